//! Headless drawing surface.
//!
//! Keeps one record per visual in paint order and logs every call, standing in
//! for a real rasterizer.

use kurbo::{Rect, Size};
use peniko::Color;
use shapeedit_core::shapes::{SerializableColor, ShapeKind};
use shapeedit_core::{LayerDirection, ShapeSnapshot, VisualHandle, Visuals};
use std::fmt::Write;

/// Cached render state of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualRecord {
    pub handle: VisualHandle,
    pub kind: ShapeKind,
    pub bounds: Rect,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
    pub dash: Vec<f64>,
}

impl VisualRecord {
    fn new(handle: VisualHandle, kind: ShapeKind, shape: &ShapeSnapshot) -> Self {
        let mut record = Self {
            handle,
            kind,
            bounds: Rect::ZERO,
            fill: Color::TRANSPARENT,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
            dash: Vec::new(),
        };
        record.refresh(shape);
        record
    }

    fn refresh(&mut self, shape: &ShapeSnapshot) {
        self.bounds = shape.bounds();
        self.fill = shape
            .style
            .fill_color()
            .map_or(Color::TRANSPARENT, Color::from);
        self.stroke = shape
            .style
            .stroke_color()
            .map_or(Color::TRANSPARENT, Color::from);
        self.stroke_width = shape.style.stroke_width;
        self.dash = shape.dash_pattern().to_vec();
    }
}

/// Surface that renders to a text listing.
#[derive(Debug)]
pub struct HeadlessSurface {
    size: Size,
    background: Color,
    /// Back to front.
    records: Vec<VisualRecord>,
    active: Option<VisualHandle>,
    redraws: usize,
    next_handle: u64,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32, background: &str) -> Self {
        Self {
            size: Size::new(width as f64, height as f64),
            background: SerializableColor::parse_hex(background).into(),
            records: Vec::new(),
            active: None,
            redraws: 0,
            next_handle: 0,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Records in paint order (back to front).
    pub fn records(&self) -> &[VisualRecord] {
        &self.records
    }

    pub fn active(&self) -> Option<VisualHandle> {
        self.active
    }

    /// Number of redraws requested so far.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    fn position(&self, handle: VisualHandle) -> Option<usize> {
        self.records.iter().position(|r| r.handle == handle)
    }

    /// Text listing of the surface, back to front.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            let marker = if Some(record.handle) == self.active { '*' } else { ' ' };
            let fill = SerializableColor::from(record.fill);
            let stroke = SerializableColor::from(record.stroke);
            let _ = writeln!(
                out,
                "{} #{} {:<9} ({:.0}, {:.0}) {:.0}x{:.0} fill {} stroke {} {}px dash {:?}",
                marker,
                record.handle.0,
                record.kind,
                record.bounds.x0,
                record.bounds.y0,
                record.bounds.width(),
                record.bounds.height(),
                fill.to_hex(),
                stroke.to_hex(),
                record.stroke_width,
                record.dash,
            );
        }
        out
    }
}

impl Visuals for HeadlessSurface {
    fn add_visual(&mut self, kind: ShapeKind, shape: &ShapeSnapshot) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.records.push(VisualRecord::new(handle, kind, shape));
        log::debug!("Surface: added {} as #{}", kind, handle.0);
        handle
    }

    fn set_active(&mut self, handle: Option<VisualHandle>) {
        self.active = handle;
    }

    fn reorder(&mut self, handle: VisualHandle, direction: LayerDirection) {
        let Some(pos) = self.position(handle) else {
            log::warn!("Surface: reorder of unknown visual #{}", handle.0);
            return;
        };
        match direction {
            LayerDirection::Forward if pos + 1 < self.records.len() => {
                self.records.swap(pos, pos + 1)
            }
            LayerDirection::Backward if pos > 0 => self.records.swap(pos, pos - 1),
            _ => {}
        }
    }

    fn restack(&mut self, order: &[VisualHandle]) {
        self.records.sort_by_key(|record| {
            order
                .iter()
                .position(|&h| h == record.handle)
                .unwrap_or(usize::MAX)
        });
    }

    fn update_visual(&mut self, handle: VisualHandle, shape: &ShapeSnapshot) {
        match self.records.iter_mut().find(|r| r.handle == handle) {
            Some(record) => record.refresh(shape),
            None => log::warn!("Surface: update of unknown visual #{}", handle.0),
        }
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
        log::trace!("Surface: redraw {}", self.redraws);
    }
}
