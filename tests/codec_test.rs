//! Record format tests over trees grown by learning

use std::fs::File;
use std::io::BufReader;

use rstest::rstest;
use tempfile::TempDir;

use animals::domain::{codec, Node, ParseError};

/// A learning step: path of answers from the root to the leaf, new animal,
/// question, and whether the new animal answers yes.
type Lesson = (&'static [bool], &'static str, &'static str, bool);

fn grow(lessons: &[Lesson]) -> Node {
    let mut tree = Node::default();
    for (path, animal, question, yes) in lessons {
        let mut node = &mut tree;
        for &step in path.iter() {
            node = node.child_mut(step).expect("path leads to a node");
        }
        node.learn(animal, *question, *yes).unwrap();
    }
    tree
}

/// Shape as a pre-order string: `L` for a leaf, `Q` for a question.
fn shape(tree: &Node) -> String {
    tree.iter()
        .map(|n| if n.is_leaf() { 'L' } else { 'Q' })
        .collect()
}

fn texts(tree: &Node) -> Vec<&str> {
    tree.iter().map(Node::text).collect()
}

/// Tree whose yes branch keeps splitting until the deepest leaf sits below
/// `depth` questions.
fn yes_chain(depth: usize) -> Node {
    let mut tree = Node::default();
    let mut leaf = &mut tree;
    for i in 0..depth {
        leaf.learn(&format!("animal {i}"), format!("Question {i}?"), true)
            .unwrap();
        leaf = leaf.child_mut(true).unwrap();
    }
    tree
}

const DOG: Lesson = (&[], "dog", "Does it bark?", true);
const EAGLE: Lesson = (&[false], "eagle", "Can it fly?", true);
const FISH: Lesson = (&[false, false], "fish", "Does it walk?", false);
const WOLF: Lesson = (&[true], "wolf", "Is it wild?", true);
const PENGUIN: Lesson = (&[false, true], "penguin", "Does it swim?", true);

#[rstest]
#[case::fresh(&[])]
#[case::one_lesson(&[DOG])]
#[case::left_spine(&[DOG, EAGLE, FISH])]
#[case::bushy(&[DOG, EAGLE, FISH, WOLF, PENGUIN])]
fn given_grown_tree_when_round_tripping_then_same_texts_and_shape(#[case] lessons: &[Lesson]) {
    let tree = grow(lessons);

    let restored = codec::restore(&codec::persist(&tree)).unwrap().unwrap();

    assert_eq!(texts(&restored), texts(&tree));
    assert_eq!(shape(&restored), shape(&tree));
    assert_eq!(restored, tree);
}

#[rstest]
#[case::one_lesson(&[DOG], 3, 2)]
#[case::bushy(&[DOG, EAGLE, FISH, WOLF, PENGUIN], 11, 6)]
fn given_lessons_when_growing_then_each_adds_two_nodes(
    #[case] lessons: &[Lesson],
    #[case] nodes: usize,
    #[case] leaves: usize,
) {
    let tree = grow(lessons);

    assert_eq!(tree.node_count(), nodes);
    assert_eq!(tree.leaf_count(), leaves);
    assert_eq!(
        codec::persist(&tree).lines().count(),
        nodes + 2 * leaves,
        "every leaf writes two sentinels"
    );
}

#[test]
fn given_tree_written_to_file_when_reading_back_then_identical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("animals.dat");
    let tree = grow(&[DOG, EAGLE, FISH, WOLF, PENGUIN]);

    let mut file = File::create(&path).unwrap();
    codec::write_to(&tree, &mut file).unwrap();
    drop(file);

    let restored = codec::read_from(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(restored, Some(tree));
}

#[test]
fn given_bushy_tree_when_persisting_then_pre_order_yes_before_no() {
    let tree = grow(&[DOG, EAGLE]);

    assert_eq!(
        texts(&tree),
        vec![
            "Does it bark?",
            "Is it a dog?",
            "Can it fly?",
            "Is it a eagle?",
            "Is it a human?",
        ]
    );
    assert_eq!(shape(&tree), "QLQLL");
}

#[test]
fn given_tree_learned_to_depth_limit_when_round_tripping_then_identical() {
    let tree = yes_chain(codec::MAX_DEPTH);
    assert_eq!(tree.depth(), codec::MAX_DEPTH);

    let restored = codec::restore(&codec::persist(&tree)).unwrap();

    assert_eq!(restored, Some(tree));
}

#[test]
fn given_tree_past_depth_limit_when_restoring_then_too_deep() {
    let tree = yes_chain(codec::MAX_DEPTH + 1);

    let result = codec::restore(&codec::persist(&tree));

    assert!(matches!(result, Err(ParseError::TooDeep { .. })));
}
