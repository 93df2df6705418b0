use refscope_api::{CancellationToken, CodeLens};
use refscope_core::LensSettings;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;
use url::Url;

#[derive(Tabled)]
struct LensRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Col")]
    column: usize,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl LensRow {
    fn from_lens(lens: &CodeLens) -> Self {
        Self {
            // 1-based for humans
            line: lens.anchor.start_line + 1,
            column: lens.anchor.start_col + 1,
            kind: lens.kind.noun().to_string(),
            label: lens.label.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn run(file: &Path, root: PathBuf, resolve: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::path::absolute(file)?;
    let text = std::fs::read_to_string(&file)?;
    let uri = Url::from_file_path(&file)
        .map_err(|_| format!("cannot turn {} into a file URI", file.display()))?;

    info!("Computing lenses for {} in {}", file.display(), root.display());
    let engine = refscope_runtime::build_default_engine(root, LensSettings::default());
    let ctx = engine.editor_context(uri.as_str(), text.into());
    let provider = engine.provider();
    let cancel = CancellationToken::new();

    let mut lenses = provider.produce(ctx.as_ref(), &cancel);
    if resolve {
        lenses = lenses
            .into_iter()
            .map(|lens| provider.resolve(ctx.as_ref(), lens, &cancel))
            .collect();
    }

    println!("{}", render(&lenses));
    Ok(())
}

fn render(lenses: &[CodeLens]) -> String {
    if lenses.is_empty() {
        return "No code lenses.".to_string();
    }
    let rows: Vec<LensRow> = lenses.iter().map(LensRow::from_lens).collect();
    Table::new(rows).with(Style::modern()).to_string()
}
