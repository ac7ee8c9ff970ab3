use serde::Serialize;

use crate::face::{self, DieColor, Face, FaceCatalog};

/// Outcome of drawing a named face from a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawResult {
    /// The face was moved from the draw pile to the discard pile.
    Drawn,
    /// No copy of the face is left to draw; nothing changed.
    Absent,
}

/// One die color's cards, split into a draw pile and a discard pile.
///
/// The two piles always add up to the full composition.
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    color: DieColor,
    faces: Vec<Face>,
    composition: Vec<Face>,
    draw: Vec<Face>,
    discard: Vec<Face>,
}

impl Deck {
    pub fn new(catalog: &FaceCatalog, color: DieColor) -> Self {
        let composition = catalog.tripled(color);
        Deck {
            color,
            faces: catalog.faces(color).to_vec(),
            draw: composition.clone(),
            discard: Vec::with_capacity(composition.len()),
            composition,
        }
    }

    pub fn draw(&mut self, face: Face) -> DrawResult {
        match self.draw.iter().position(|&c| c == face) {
            Some(idx) => {
                let card = self.draw.remove(idx);
                self.discard.push(card);
                DrawResult::Drawn
            }
            None => DrawResult::Absent,
        }
    }

    pub fn reset(&mut self) {
        self.draw.clone_from(&self.composition);
        self.discard.clear();
    }

    pub fn count(&self, face: Face) -> usize {
        self.draw.iter().filter(|&&c| c == face).count()
    }

    pub fn can_draw(&self, face: Face) -> bool {
        self.draw.contains(&face)
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    pub fn color(&self) -> DieColor {
        self.color
    }

    /// The die's six faces in catalog order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Distinct faces in catalog order.
    pub fn unique_faces(&self) -> Vec<Face> {
        face::unique_faces(&self.faces)
    }

    pub fn composition(&self) -> &[Face] {
        &self.composition
    }

    pub fn draw_pile(&self) -> &[Face] {
        &self.draw
    }

    pub fn discard_pile(&self) -> &[Face] {
        &self.discard
    }
}
