use crate::id_generator::ShapeId;
use crate::shape::{Shape, ShapeKind};

/// Per-kind shape collections.
///
/// Each kind lives in its own layer; layers are painted in `ShapeKind::ALL`
/// order and shapes within a layer in insertion order. Every shape stored in
/// a layer has that layer's kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layers {
    layers: [Vec<Shape>; 6],
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `shape` to the end of its kind's layer.
    pub fn push(&mut self, shape: Shape) {
        self.layers[shape.kind().index()].push(shape);
    }

    pub fn layer(&self, kind: ShapeKind) -> &[Shape] {
        &self.layers[kind.index()]
    }

    pub fn get(&self, kind: ShapeKind, id: ShapeId) -> Option<&Shape> {
        self.layer(kind).iter().find(|shape| shape.id() == id)
    }

    pub fn get_mut(&mut self, kind: ShapeKind, id: ShapeId) -> Option<&mut Shape> {
        self.layers[kind.index()]
            .iter_mut()
            .find(|shape| shape.id() == id)
    }

    pub fn contains(&self, kind: ShapeKind, id: ShapeId) -> bool {
        self.get(kind, id).is_some()
    }

    /// Removes the shape and returns it; siblings keep their order.
    pub fn remove(&mut self, kind: ShapeKind, id: ShapeId) -> Option<Shape> {
        let layer = &mut self.layers[kind.index()];
        let index = layer.iter().position(|shape| shape.id() == id)?;
        Some(layer.remove(index))
    }

    /// All shapes, bottom of the paint order first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.layers.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::generate_id;
    use crate::shape::{Circle, Rectangle, Text};
    use egui::Pos2;

    #[test]
    fn shapes_land_in_their_kind_layer() {
        let mut layers = Layers::new();
        layers.push(Circle::new(generate_id(), "#000", Pos2::ZERO).into());
        layers.push(Rectangle::new(generate_id(), "#000", Pos2::ZERO).into());
        assert_eq!(layers.layer(ShapeKind::Circle).len(), 1);
        assert_eq!(layers.layer(ShapeKind::Rectangle).len(), 1);
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn iteration_follows_paint_order() {
        let mut layers = Layers::new();
        layers.push(Text::new(generate_id(), "#000", Pos2::ZERO, "hi").into());
        layers.push(Rectangle::new(generate_id(), "#000", Pos2::ZERO).into());
        let kinds: Vec<_> = layers.iter().map(Shape::kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Rectangle, ShapeKind::Text]);
    }

    #[test]
    fn remove_only_touches_the_matching_id() {
        let mut layers = Layers::new();
        let keep = generate_id();
        let drop = generate_id();
        layers.push(Circle::new(keep, "#000", Pos2::ZERO).into());
        layers.push(Circle::new(drop, "#000", Pos2::ZERO).into());

        let removed = layers.remove(ShapeKind::Circle, drop).unwrap();
        assert_eq!(removed.id(), drop);
        assert!(layers.contains(ShapeKind::Circle, keep));
        assert!(layers.remove(ShapeKind::Circle, drop).is_none());
    }

    #[test]
    fn lookup_is_scoped_to_the_kind() {
        let mut layers = Layers::new();
        let id = generate_id();
        layers.push(Circle::new(id, "#000", Pos2::ZERO).into());
        assert!(layers.get(ShapeKind::Rectangle, id).is_none());
    }
}
