use super::layer::LayerOutput;
use crate::math::Rgba;

/// 2D drawing operations for canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill entire canvas with color, replacing what is there
    Clear(Rgba),

    /// Blend a single pixel at (x, y)
    Point { x: i32, y: i32, color: Rgba },

    /// Blend a filled disc centred at (cx, cy); edge pixels are antialiased
    FilledCircle { cx: f32, cy: f32, radius: f32, color: Rgba },
}

/// Canvas state - pixel buffer with draw operations
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<Rgba>,
    /// Alpha channel (0.0 = transparent, 1.0 = opaque)
    alpha: Vec<f32>,
    /// Pending draw operations
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create new transparent canvas with dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = width as usize * height as usize;

        Self {
            pixels: vec![Rgba::TRANSPARENT; pixel_count],
            alpha: vec![0.0; pixel_count],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Add draw operation - functional style
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.operations.push(op);
        self
    }

    /// Queue many operations at once
    pub fn draw_all(mut self, ops: impl IntoIterator<Item = DrawOp>) -> Self {
        self.operations.extend(ops);
        self
    }

    /// Execute all pending operations, consuming the queue
    pub fn execute_ops(mut self) -> Self {
        let operations = std::mem::take(&mut self.operations);
        for op in &operations {
            self.execute_op(op);
        }
        self
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::Point { x, y, color } => self.blend_pixel(x, y, color, 1.0),
            DrawOp::FilledCircle { cx, cy, radius, color } => {
                self.draw_filled_circle(cx, cy, radius, color)
            }
        }
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
        self.alpha.fill(color.alpha_f32());
    }

    /// Source-over `color` onto (x, y), its alpha scaled by `coverage`
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }

        let idx = y as usize * self.width as usize + x as usize;
        let a = (color.alpha_f32() * coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
        if a == 0 {
            return;
        }

        let blended = Rgba { a, ..color }.over(self.pixels[idx]);
        self.pixels[idx] = blended;
        self.alpha[idx] = blended.alpha_f32();
    }

    /// Discs under one pixel wide collapse to a point whose alpha carries the area
    fn draw_filled_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }

        if radius < 0.5 {
            let area = std::f32::consts::PI * radius * radius;
            self.blend_pixel(cx.floor() as i32, cy.floor() as i32, color, area);
            return;
        }

        let min_x = (cx - radius).floor() as i32;
        let max_x = (cx + radius).ceil() as i32;
        let min_y = (cy - radius).floor() as i32;
        let max_y = (cy + radius).ceil() as i32;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(px, py, color, coverage);
                }
            }
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel buffer as tightly packed RGBA8
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn alpha(&self) -> &[f32] {
        &self.alpha
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn into_output(self) -> LayerOutput {
        LayerOutput::with_alpha(self.pixels, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_creation() {
        let canvas = Canvas::new(100, 50);
        assert_eq!(canvas.dimensions(), (100, 50));
        assert_eq!(canvas.pixels().len(), 5000);
        assert_eq!(canvas.as_bytes().len(), 5000 * 4);
        assert!(canvas.alpha().iter().all(|&a| a == 0.0));
    }

    #[test]
    fn ops_are_deferred_until_executed() {
        let canvas = Canvas::new(4, 4).draw(DrawOp::Clear(Rgba::new(255, 0, 0, 255)));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::TRANSPARENT));

        let canvas = canvas.execute_ops();
        assert_eq!(canvas.pixel(3, 3), Some(Rgba::new(255, 0, 0, 255)));
        assert_eq!(canvas.alpha()[15], 1.0);
    }

    #[test]
    fn point_blends_over_existing() {
        let canvas = Canvas::new(2, 2)
            .draw(DrawOp::Clear(Rgba::new(0, 0, 0, 255)))
            .draw(DrawOp::Point { x: 1, y: 0, color: Rgba::new(255, 255, 255, 128) })
            .execute_ops();

        let p = canvas.pixel(1, 0).unwrap();
        assert_eq!(p.a, 255);
        assert!((p.r as i32 - 128).abs() <= 1);
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::new(0, 0, 0, 255)));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let canvas = Canvas::new(3, 3)
            .draw(DrawOp::Point { x: -1, y: 1, color: Rgba::new(255, 0, 0, 255) })
            .draw(DrawOp::Point { x: 3, y: 1, color: Rgba::new(255, 0, 0, 255) })
            .draw(DrawOp::FilledCircle { cx: -10.0, cy: -10.0, radius: 2.0, color: Rgba::new(255, 0, 0, 255) })
            .execute_ops();

        assert!(canvas.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn filled_circle_covers_centre_not_corners() {
        let canvas = Canvas::new(20, 20)
            .draw(DrawOp::FilledCircle { cx: 10.0, cy: 10.0, radius: 4.0, color: Rgba::new(200, 200, 255, 255) })
            .execute_ops();

        assert_eq!(canvas.pixel(10, 10), Some(Rgba::new(200, 200, 255, 255)));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(19, 19), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn sub_pixel_circle_fades_with_area() {
        let canvas = Canvas::new(4, 4)
            .draw(DrawOp::FilledCircle { cx: 1.5, cy: 1.5, radius: 0.25, color: Rgba::new(255, 255, 255, 255) })
            .execute_ops();

        let p = canvas.pixel(1, 1).unwrap();
        assert!(p.a > 0 && p.a < 255);
        assert_eq!(canvas.alpha().iter().filter(|&&a| a > 0.0).count(), 1);
    }
}
