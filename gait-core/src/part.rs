//! Rigid segments chained through an owned, optional child link.

use crate::math::{rotation_z_deg, translation, Color, Mat4, Vec3};
use crate::render::{DrawCommand, PartKind, Primitive, RenderSink};

/// Length and width read from a geometry source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub length: f32,
    pub width: f32,
}

/// One rigid box-like segment. The child, when present, is attached at this
/// segment's tip and owned exclusively by it.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub length: f32,
    pub width: f32,
    /// Local rotation in degrees about the segment's Z axis.
    pub angle: f32,
    pub child: Option<Box<Part>>,
}

impl Default for Part {
    fn default() -> Self { Self::new(1.0, 0.5) }
}

impl Part {
    pub fn new(length: f32, width: f32) -> Self {
        Self { length, width, angle: 0.0, child: None }
    }

    pub fn with_child(mut self, child: Part) -> Self {
        self.child = Some(Box::new(child));
        self
    }

    pub fn set_child(&mut self, child: Part) -> Option<Part> {
        self.child.replace(Box::new(child)).map(|b| *b)
    }

    pub fn take_child(&mut self) -> Option<Part> {
        self.child.take().map(|b| *b)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions { length: self.length, width: self.width }
    }

    pub fn set_dimensions(&mut self, dims: Dimensions) {
        self.length = dims.length;
        self.width = dims.width;
    }

    /// Iterate this part followed by each descendant, root first.
    pub fn chain(&self) -> Chain<'_> { Chain { next: Some(self) } }

    pub fn chain_len(&self) -> usize { self.chain().count() }

    /// Frame of the segment itself: the parent frame rotated by `angle`.
    pub fn local_frame(&self, parent: Mat4) -> Mat4 {
        parent * rotation_z_deg(self.angle)
    }

    /// Frame handed to the child: the segment frame moved to the tip.
    pub fn tip_frame(&self, parent: Mat4) -> Mat4 {
        self.local_frame(parent) * translation(0.0, self.length, 0.0)
    }

    /// Emit one unit cube scaled to `(width, length, width)` for this part and
    /// recurse once into the child from the tip frame.
    pub fn compose(&self, parent: Mat4, kind: PartKind, color: Color, sink: &mut dyn RenderSink) {
        let frame = self.local_frame(parent);
        sink.draw(DrawCommand {
            part: kind,
            transform: frame * Mat4::from_scale(Vec3::new(self.width, self.length, self.width)),
            primitive: Primitive::Cube,
            color,
        });
        if let Some(child) = &self.child {
            child.compose(self.tip_frame(parent), kind, color, sink);
        }
    }
}

pub struct Chain<'a> {
    next: Option<&'a Part>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Part;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = cur.child.as_deref();
        Some(cur)
    }
}
