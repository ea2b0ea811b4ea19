use super::*;
use crate::geometry::{Point, Rect};

fn line_sections(y: i32, start: i32, length: i32) -> Vec<Section> {
    vec![Section::horizontal(y, start, length)]
}

#[test]
fn skeleton_is_derived_from_sections() {
    let mut store = FilamentStore::new();
    let id = store.add_filament(Vec::new(), line_sections(12, 5, 10));
    let fil = store.filament(id);
    assert_eq!(fil.points().len(), 10);
    assert_eq!(fil.start_point(), Point::new(5.0, 12.0));
    assert_eq!(fil.stop_point(), Point::new(14.0, 12.0));
    assert_eq!(fil.bounds(), Rect::new(5, 12, 10, 1));
    assert_eq!(fil.true_length(), 10);
}

#[test]
fn y_at_interpolates_and_prolongs_the_skeleton() {
    let mut store = FilamentStore::new();
    let id = store.add_filament(
        vec![Point::new(0.0, 10.0), Point::new(10.0, 20.0)],
        Vec::new(),
    );
    let fil = store.filament(id);
    assert!((fil.y_at(5.0) - 15.0).abs() < 1e-5);
    assert!((fil.y_at(-10.0) - 0.0).abs() < 1e-5);
    assert!((fil.y_at(20.0) - 30.0).abs() < 1e-5);
    assert!(fil.within_range(10.0));
    assert!(!fil.within_range(10.5));
}

#[test]
fn true_length_ignores_gaps_between_sections() {
    let mut store = FilamentStore::new();
    let sections = vec![
        Section::horizontal(4, 0, 10),
        Section::horizontal(5, 20, 5),
        Section::horizontal(4, 22, 4),
    ];
    let id = store.add_filament(Vec::new(), sections);
    assert_eq!(store.filament(id).true_length(), 16);
    assert_eq!(store.filament(id).bounds(), Rect::new(0, 4, 26, 2));
}

#[test]
fn thickness_spans_all_sections_at_column() {
    let upper = Section::new(10, vec![Run::new(0, 10), Run::new(2, 6)]);
    let lower = Section::horizontal(14, 4, 10);
    assert_eq!(thickness_at(3, [&upper, &lower]), 2.0);
    assert_eq!(thickness_at(5, [&upper, &lower]), 5.0);
    assert_eq!(thickness_at(50, [&upper, &lower]), 0.0);
}

#[test]
fn combs_are_linked_back_onto_filaments() {
    let mut store = FilamentStore::new();
    let a = store.add_filament(Vec::new(), line_sections(0, 0, 10));
    let b = store.add_filament(Vec::new(), line_sections(20, 0, 10));
    let comb = store.add_comb(5, vec![a, b]);
    assert_eq!(store.filament(a).combs(), &[comb]);
    assert_eq!(store.filament(b).combs(), &[comb]);
    assert_eq!(store.comb(comb).count(), 2);
    assert_eq!(store.comb_index_of(comb, b), Some(1));
    assert_eq!(store.pending_combs(), 1);
}

#[test]
fn attach_resolves_ancestor_and_moves_combs() {
    let mut store = FilamentStore::new();
    let root = store.add_filament(Vec::new(), line_sections(0, 0, 10));
    let child = store.add_filament(Vec::new(), line_sections(0, 12, 10));
    let other = store.add_filament(Vec::new(), line_sections(20, 12, 10));
    let comb = store.add_comb(15, vec![child, other]);

    store.attach(child, root);
    assert_eq!(store.ancestor(child), root);
    assert_eq!(store.ancestor(root), root);
    assert!(store.filament(root).combs().contains(&comb));
    assert_eq!(store.comb_index_of(comb, root), Some(0));

    // Attaching twice is harmless.
    store.attach(child, root);
    assert_eq!(store.filament(root).combs().len(), 1);
}
