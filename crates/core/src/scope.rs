use refscope_api::{LensResult, Project, ProjectRoot, RootKind, SearchScope, SymbolIndex};
use tracing::debug;

/// Builds a search scope over every open project, restricted to source
/// roots. Called afresh for each resolution since projects come and go.
pub fn build_scope(index: &dyn SymbolIndex) -> LensResult<SearchScope> {
    let projects: Vec<Project> = index
        .projects()?
        .into_iter()
        .filter_map(sources_only)
        .collect();
    let scope = SearchScope::new(projects);
    if scope.is_empty() {
        debug!("No open project has a source root; searches will find nothing");
    } else {
        debug!("Search scope spans {} projects", scope.projects().len());
    }
    Ok(scope)
}

fn sources_only(project: Project) -> Option<Project> {
    let roots: Vec<ProjectRoot> = project
        .roots
        .into_iter()
        .filter(|r| r.kind == RootKind::Source)
        .collect();
    if roots.is_empty() {
        return None;
    }
    Some(Project {
        name: project.name,
        roots,
    })
}
