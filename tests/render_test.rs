//! Tests for diagram rendering
//!
//! Output layout:
//! - Root line has no prefix
//! - Each child gets a `|` connector line and a `+- ` prefix
//! - Deeper levels repeat `|  ` once per ancestor below the root

use settree::domain::{evaluate, ElementOrder, RenderStyle, Renderer, TreeBuilder};
use settree::util::testing::lines;

fn render_with(input: &str, renderer: Renderer) -> String {
    let tree = TreeBuilder::new().build(lines(input)).unwrap();
    renderer.render(&evaluate(&tree))
}

fn render(input: &str) -> String {
    render_with(input, Renderer::default())
}

#[test]
fn given_intersection_of_two_sets_when_rendering_then_matches_reference_diagram() {
    // Arrange
    let input = "
1,,I
2,1,10,20,30
3,1,20,30,40";

    // Act
    let out = render(input);

    // Assert
    let expected = "\
1 : I -> {20, 30}
|
+- 2 : {10, 20, 30} -> {10, 20, 30}
|
+- 3 : {20, 30, 40} -> {20, 30, 40}
";
    assert_eq!(out, expected);
}

#[test]
fn given_union_of_two_sets_when_rendering_then_root_shows_union() {
    let out = render("1,,U\n2,1,1,2\n3,1,2,3");

    let rendered: Vec<_> = out.lines().collect();
    assert_eq!(rendered[0], "1 : U -> {1, 2, 3}");
    assert_eq!(rendered[2], "+- 2 : {1, 2} -> {1, 2}");
    assert_eq!(rendered[4], "+- 3 : {2, 3} -> {2, 3}");
}

#[test]
fn given_single_root_when_rendering_then_one_line_with_empty_set() {
    assert_eq!(render("1,,U"), "1 : U -> {}\n");
    assert_eq!(render("7,,3,1"), "7 : {3, 1} -> {3, 1}\n");
}

#[test]
fn given_three_levels_when_rendering_then_indentation_grows_per_level() {
    // Arrange
    let input = "
1,,U
2,1,U
3,2,I
4,3,5,6";

    // Act
    let out = render(input);

    // Assert
    let expected = "\
1 : U -> {5, 6}
|
+- 2 : U -> {5, 6}
|  |
|  +- 3 : I -> {5, 6}
|  |  |
|  |  +- 4 : {5, 6} -> {5, 6}
";
    assert_eq!(out, expected);
}

#[test]
fn given_explicit_parent_with_children_when_rendering_then_parent_shows_own_set() {
    let out = render("1,,5,6\n2,1,7,7\n3,2,8");

    let expected = "\
1 : {5, 6} -> {5, 6}
|
+- 2 : {7} -> {7}
|  |
|  +- 3 : {8} -> {8}
";
    assert_eq!(out, expected);
}

#[test]
fn given_forward_references_when_rendering_then_children_in_line_order() {
    // Children are listed in the order their own lines appear
    let out = render("3,1,30\n1,,U\n2,1,20");

    let ids: Vec<_> = out
        .lines()
        .filter_map(|l| l.trim_start_matches(['|', ' ', '+', '-']).split(" : ").next())
        .filter(|id| !id.is_empty())
        .collect();
    assert_eq!(ids, vec!["1", "3", "2"]);
}

#[test]
fn given_same_input_when_rendering_twice_then_identical_output() {
    let input = "1,,U\n2,1,9,3,5\n3,1,I\n4,3,5,9\n5,3,9,5,1";

    assert_eq!(render(input), render(input));
}

#[test]
fn given_ascending_order_when_rendering_then_sets_sorted() {
    let out = render_with(
        "1,,U\n2,1,9,3\n3,1,5,1",
        Renderer::new(RenderStyle::Ascii, ElementOrder::Ascending),
    );

    assert!(out.starts_with("1 : U -> {1, 3, 5, 9}\n"));
    assert!(out.contains("+- 2 : {3, 9} -> {3, 9}"));
}

#[test]
fn given_tree_style_when_rendering_then_one_line_per_node() {
    let out = render_with(
        "1,,U\n2,1,U\n3,2,4\n4,1,5",
        Renderer::new(RenderStyle::Tree, ElementOrder::Insertion),
    );

    assert_eq!(out.lines().count(), 4);
    assert!(out.starts_with("1 : U -> {4, 5}\n"));
    assert!(!out.contains("+- "));
}
