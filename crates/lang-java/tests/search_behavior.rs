#[allow(dead_code)]
mod common;

use common::setup_java_workspace;
use refscope_api::{
    CancellationToken, DeclarationKind, LensError, SearchFor, SearchPattern, SearchScope,
    SymbolIndex, SymbolKey,
};
use smol_str::SmolStr;

fn implementations_of(name: &str) -> SearchPattern {
    SearchPattern {
        symbol: SymbolKey {
            unit: "file:///Shape.java".to_string(),
            name: SmolStr::new(name),
            kind: DeclarationKind::Type,
            container: None,
            signature: None,
        },
        limit_to: SearchFor::Implementations,
    }
}

#[test]
fn given_several_matching_files_when_searching_then_every_file_reports() {
    let ws = setup_java_workspace(vec![
        ("geo/Circle.java", "package geo;\nclass Circle implements Shape {}\n"),
        ("geo/Square.java", "package geo;\nclass Square implements Shape {}\n"),
        ("geo/Line.java", "package geo;\nclass Line implements Shape {}\n"),
    ]);
    let scope = SearchScope::new(ws.workspace.projects().unwrap());
    let participant = ws.workspace.default_participants().remove(0);

    let mut found = Vec::new();
    let result = participant.locate_matches(
        &implementations_of("Shape"),
        &scope,
        &CancellationToken::new(),
        &mut |m| found.push(m.element.to_string()),
    );

    assert!(result.is_ok());
    found.sort();
    assert_eq!(found, ["Circle", "Line", "Square"]);
}

#[test]
fn given_token_cancelled_after_first_file_when_searching_then_walk_stops_with_cancelled() {
    let ws = setup_java_workspace(vec![
        ("geo/Circle.java", "package geo;\nclass Circle implements Shape {}\n"),
        ("geo/Square.java", "package geo;\nclass Square implements Shape {}\n"),
        ("geo/Line.java", "package geo;\nclass Line implements Shape {}\n"),
    ]);
    let scope = SearchScope::new(ws.workspace.projects().unwrap());
    let participant = ws.workspace.default_participants().remove(0);
    let cancel = CancellationToken::new();

    let mut found = Vec::new();
    let result = participant.locate_matches(
        &implementations_of("Shape"),
        &scope,
        &cancel,
        &mut |m| {
            found.push(m.element.to_string());
            cancel.cancel();
        },
    );

    assert!(matches!(result, Err(LensError::Cancelled)));
    assert_eq!(found.len(), 1);
}
