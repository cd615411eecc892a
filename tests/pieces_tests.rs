//! Pieces tests - catalog layouts and clockwise rotation

use blockfall::core::{random_piece, rotate_clockwise, spawn_shape, ScriptedDraw, Shape, SimpleRng};
use blockfall::types::PieceKind;

fn layout(shape: &Shape) -> Vec<String> {
    (0..shape.rows())
        .map(|r| {
            (0..shape.cols())
                .map(|c| if shape.get(r, c).is_some() { '#' } else { '.' })
                .collect()
        })
        .collect()
}

// ============== Catalog ==============

#[test]
fn test_catalog_layouts() {
    let expected: [(PieceKind, &[&str]); 7] = [
        (PieceKind::I, &["####"]),
        (PieceKind::J, &["#..", "###"]),
        (PieceKind::L, &["..#", "###"]),
        (PieceKind::O, &["##", "##"]),
        (PieceKind::S, &[".##", "##."]),
        (PieceKind::T, &["###", ".#."]),
        (PieceKind::Z, &["##.", ".##"]),
    ];
    for (kind, rows) in expected {
        assert_eq!(layout(&spawn_shape(kind)), rows, "{kind:?}");
    }
}

#[test]
fn test_catalog_cells_carry_kind() {
    for kind in PieceKind::ALL {
        let shape = spawn_shape(kind);
        for (r, c) in shape.occupied() {
            assert_eq!(shape.get(r as usize, c as usize), Some(kind));
        }
    }
}

// ============== Rotation ==============

#[test]
fn test_rotation_maps_cells() {
    let l = spawn_shape(PieceKind::L);
    let h = l.rows() as i32;
    let rotated = rotate_clockwise(&l);
    assert_eq!((rotated.rows(), rotated.cols()), (l.cols(), l.rows()));
    for (r, c) in l.occupied() {
        assert_eq!(
            rotated.get(c as usize, (h - 1 - r) as usize),
            Some(PieceKind::L),
            "({r}, {c})"
        );
    }
    assert_eq!(rotated.occupied().count(), 4);
}

#[test]
fn test_l_rotation_cycle() {
    let l = spawn_shape(PieceKind::L);
    let east = l.rotated_cw();
    let south = east.rotated_cw();
    let west = south.rotated_cw();
    assert_eq!(layout(&east), ["#.", "#.", "##"]);
    assert_eq!(layout(&south), ["###", "#.."]);
    assert_eq!(layout(&west), ["##", ".#", ".#"]);
    assert_eq!(west.rotated_cw(), l);
}

#[test]
fn test_four_rotations_identity_for_custom_shape() {
    let shape = Shape::new(
        PieceKind::T,
        &[&[true, false, false], &[true, true, false], &[false, false, true]],
    )
    .unwrap();
    let mut turned = shape.clone();
    for _ in 0..4 {
        turned = rotate_clockwise(&turned);
    }
    assert_eq!(turned, shape);
}

#[test]
fn test_o_rotation_unchanged() {
    let o = spawn_shape(PieceKind::O);
    assert_eq!(rotate_clockwise(&o), o);
}

#[test]
fn test_two_rotations_of_i_match() {
    // I has two distinct orientations.
    let i = spawn_shape(PieceKind::I);
    assert_ne!(i.rotated_cw(), i);
    assert_eq!(i.rotated_cw().rotated_cw(), i);
}

// ============== random_piece ==============

#[test]
fn test_random_piece_follows_script() {
    let mut draw = ScriptedDraw::new((0..7).collect());
    for kind in PieceKind::ALL {
        let (shape, drawn) = random_piece(&mut draw);
        assert_eq!(drawn, kind);
        assert_eq!(shape, spawn_shape(kind));
    }
    assert_eq!(draw.taken(), 7);
}

#[test]
fn test_random_piece_with_seeded_rng_is_repeatable() {
    let mut a = SimpleRng::new(99);
    let mut b = SimpleRng::new(99);
    let seq_a: Vec<_> = (0..50).map(|_| random_piece(&mut a).1).collect();
    let seq_b: Vec<_> = (0..50).map(|_| random_piece(&mut b).1).collect();
    assert_eq!(seq_a, seq_b);
}

#[test]
fn test_random_piece_reaches_every_kind() {
    let mut rng = SimpleRng::new(12345);
    let mut seen = [false; 7];
    for _ in 0..500 {
        let (_, kind) = random_piece(&mut rng);
        seen[kind.id() as usize - 1] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
