use regtree::{Error, LevelView, NodeId, Tree};
use tuiwin::{MenuItem, MenuRequest, Rect, Window};

const REGION: Rect = Rect::new(0, 1, 30, 10);

fn screen() -> Window {
    Window::new(Rect::new(0, 0, 30, 11))
}

/// root
/// ├── alpha
/// └── beta
///     └── gamma
struct Fixture {
    tree: Tree,
    root: NodeId,
    alpha: NodeId,
    beta: NodeId,
    gamma: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = Tree::new();
    let root = tree.create(None, "root").unwrap();
    let alpha = tree.create(Some(root), "alpha").unwrap();
    let beta = tree.create(Some(root), "beta").unwrap();
    tree.append(alpha, beta);
    let gamma = tree.create(Some(beta), "gamma").unwrap();
    Fixture {
        tree,
        root,
        alpha,
        beta,
        gamma,
    }
}

fn labels(view: &LevelView) -> Vec<String> {
    view.items().iter().map(|i| i.name().to_string()).collect()
}

// ============================================================================
// Construction and update
// ============================================================================

#[test]
fn test_new_shows_root_children() {
    let f = fixture();
    let view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();

    assert_eq!(labels(&view), ["alpha", "+beta"]);
    assert_eq!(view.current_head(), Some(f.alpha));
    assert_eq!(view.items()[1].user(), Some(f.beta));
    assert!(!view.menu().is_posted());
}

#[test]
fn test_labels_cached_only_for_expandable_nodes() {
    let f = fixture();
    let view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();

    assert_eq!(view.tree()[f.beta].label(), Some("+beta"));
    assert_eq!(view.tree()[f.alpha].label(), None);
}

#[test]
fn test_update_same_chain_twice() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    let used = view.tree().scope().used();

    view.update(Some(f.alpha)).unwrap();
    view.update(Some(f.alpha)).unwrap();

    assert_eq!(view.items().len(), 2);
    assert_eq!(labels(&view), ["alpha", "+beta"]);
    assert_eq!(view.tree()[f.beta].label(), Some("+beta"));
    assert_eq!(view.tree().scope().used(), used);
}

#[test]
fn test_update_clears_labels_of_previous_level() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();

    view.update(Some(f.gamma)).unwrap();

    assert_eq!(labels(&view), ["gamma"]);
    assert_eq!(view.tree()[f.beta].label(), None);
}

#[test]
fn test_update_none_means_root_chain() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.update(Some(f.gamma)).unwrap();

    view.update(None).unwrap();
    assert_eq!(labels(&view), ["alpha", "+beta"]);
}

#[test]
fn test_update_mid_chain_shows_suffix() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.update(Some(f.beta)).unwrap();
    assert_eq!(labels(&view), ["+beta"]);
}

#[test]
fn test_empty_root_gives_empty_level() {
    let mut tree = Tree::new();
    let root = tree.create(None, "root").unwrap();
    let mut view = LevelView::new(tree, root, &screen(), REGION).unwrap();

    assert!(view.items().is_empty());
    assert_eq!(view.selected(), None);
    assert_eq!(view.current_head(), None);
    view.show().unwrap();
}

#[test]
fn test_failed_update_keeps_previous_level() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.show().unwrap();
    let used = view.tree().scope().used();
    let allocations = view.tree().scope().allocations();
    view.tree_mut().scope_mut().set_limit(Some(used));

    let err = view.update(Some(f.gamma)).unwrap_err();

    assert!(matches!(err, Error::Exhausted { .. }));
    assert_eq!(labels(&view), ["alpha", "+beta"]);
    assert_eq!(view.tree()[f.beta].label(), Some("+beta"));
    assert!(view.menu().is_posted());
    assert_eq!(view.tree().scope().used(), used);
    assert_eq!(view.tree().scope().allocations(), allocations);
}

#[test]
fn test_label_failure_rolls_back_item_storage() {
    let mut tree = Tree::new();
    let root = tree.create(None, "root").unwrap();
    let a = tree.create(Some(root), "a").unwrap();
    tree.create(Some(a), "a1").unwrap();
    let mut view = LevelView::new(tree, root, &screen(), REGION).unwrap();

    // Room for a one-item array but not for the "+a" label as well.
    let used = view.tree().scope().used();
    let item_bytes = std::mem::size_of::<MenuItem<NodeId>>();
    view.tree_mut()
        .scope_mut()
        .set_limit(Some(used + item_bytes + 1));

    let err = view.update(Some(a)).unwrap_err();
    assert!(matches!(err, Error::Exhausted { .. }));
    assert_eq!(view.tree().scope().used(), used);
    assert_eq!(view.tree()[a].label(), Some("+a"));
}

// ============================================================================
// Show, selection and navigation
// ============================================================================

#[test]
fn test_show_posts_and_refreshes() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.show().unwrap();

    assert!(view.menu().is_posted());
    assert!(view.window_mut().take_refresh());
    assert_eq!(view.window().line(0), "* alpha");
    assert_eq!(view.window().line(1), "  +beta");
}

#[test]
fn test_menu_window_derived_from_parent() {
    let f = fixture();
    let parent = Window::new(Rect::new(2, 3, 20, 6));
    let view = LevelView::new(f.tree, f.root, &parent, Rect::new(1, 1, 40, 40)).unwrap();

    assert_eq!(view.window().area(), Rect::new(3, 4, 19, 5));
    assert_eq!(view.menu().format(), (5, 1));
}

#[test]
fn test_descend_into_leaf_shows_empty_level() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.descend(f.alpha).unwrap();

    assert!(view.items().is_empty());
    assert_eq!(view.current_head(), None);
    assert_eq!(view.selected(), None);
}

#[test]
fn test_ascend_unknown_node_is_an_error() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    let mut cursor = Some(f.gamma);
    let popped = view.tree_mut().pop(&mut cursor).unwrap();
    view.tree_mut().destroy(popped);

    assert_eq!(view.ascend(f.gamma), Err(Error::UnknownNode(f.gamma)));
    assert_eq!(view.descend(f.gamma), Err(Error::UnknownNode(f.gamma)));
    assert_eq!(labels(&view), ["alpha", "+beta"]);
}

#[test]
fn test_show_twice_reports_posted() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.show().unwrap();
    assert!(matches!(view.show(), Err(Error::Menu(_))));
}

#[test]
fn test_update_leaves_menu_unposted() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.show().unwrap();
    view.update(Some(f.gamma)).unwrap();
    assert!(!view.menu().is_posted());
    assert_eq!(view.window().line(0), "");
}

#[test]
fn test_selection_maps_back_to_nodes() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    assert_eq!(view.selected(), Some(f.alpha));
    assert!(view.drive(MenuRequest::Down));
    assert_eq!(view.selected(), Some(f.beta));
    assert!(!view.drive(MenuRequest::Down));
    assert!(view.select(f.alpha));
    assert_eq!(view.selected(), Some(f.alpha));
    assert!(!view.select(f.gamma));
}

#[test]
fn test_drill_down_and_back_up() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    view.show().unwrap();

    view.drive(MenuRequest::Down);
    assert!(view.enter().unwrap());
    assert_eq!(labels(&view), ["gamma"]);
    assert!(view.menu().is_posted());

    // gamma has no children.
    assert!(!view.enter().unwrap());

    assert!(view.leave().unwrap());
    assert_eq!(labels(&view), ["alpha", "+beta"]);
    assert_eq!(view.selected(), Some(f.beta));

    // Already at the root's children.
    assert!(!view.leave().unwrap());
}

#[test]
fn test_descend_and_ascend_by_node() {
    let f = fixture();
    let mut view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();

    view.descend(f.beta).unwrap();
    assert_eq!(view.current_head(), Some(f.gamma));

    view.ascend(f.beta).unwrap();
    assert_eq!(view.current_head(), Some(f.alpha));
    assert_eq!(view.selected(), Some(f.beta));
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_free_releases_whole_tree() {
    let f = fixture();
    let view = LevelView::new(f.tree, f.root, &screen(), REGION).unwrap();
    let tree = view.free();

    assert!(tree.is_empty());
    assert_eq!(tree.scope().used(), 0);
    assert_eq!(tree.scope().allocations(), 0);
}

#[test]
fn test_free_from_deep_level() {
    let mut tree = Tree::new();
    let root = tree.create(None, "root").unwrap();
    let mut parent = root;
    for depth in 0..6 {
        let first = tree.create(Some(parent), &format!("k{depth}")).unwrap();
        let second = tree.create(Some(parent), &format!("v{depth}")).unwrap();
        tree.append(first, second);
        parent = first;
    }

    let mut view = LevelView::new(tree, root, &screen(), REGION).unwrap();
    view.show().unwrap();
    while view.enter().unwrap() {}
    assert_eq!(labels(&view), ["k5", "v5"]);

    let tree = view.free();
    assert!(tree.is_empty());
    assert_eq!(tree.scope().used(), 0);
    assert_eq!(tree.scope().allocations(), 0);
}
