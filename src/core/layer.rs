use super::display_context::DisplayContext;
use super::frame::FrameState;
use super::timer::FixedHz;
use crate::math::{Color, Rgba};

/// Output from a layer's render call - just pixels
#[derive(Debug, Clone)]
pub struct LayerOutput {
    /// Row-major pixel data at the display context resolution
    pub pixels: Vec<Rgba>,
    /// Optional alpha mask (0.0 = transparent, 1.0 = opaque)
    pub alpha: Option<Vec<f32>>,
}

impl LayerOutput {
    /// Create output with fully opaque pixels
    pub fn opaque(pixels: Vec<Rgba>) -> Self {
        Self { pixels, alpha: None }
    }

    /// Create output with alpha mask
    pub fn with_alpha(pixels: Vec<Rgba>, alpha: Vec<f32>) -> Self {
        Self {
            pixels,
            alpha: Some(alpha),
        }
    }

    /// Coverage of pixel `i`; pixels past the end of the mask are uncovered
    pub fn coverage(&self, i: usize) -> f32 {
        self.alpha
            .as_ref()
            .map_or(1.0, |alpha| alpha.get(i).copied().unwrap_or(0.0))
    }

    /// Whether pixels and mask both hold exactly `len` entries
    pub fn has_len(&self, len: usize) -> bool {
        self.pixels.len() == len && self.alpha.as_ref().is_none_or(|alpha| alpha.len() == len)
    }
}

/// Layer with independent update rate control
pub trait Layer {
    /// Update layer state for a new frame
    /// Returns new layer state (functional style)
    fn update(&self, frame: &FrameState) -> Box<dyn Layer>;

    /// Render layer pixels
    fn render(&self, frame: &FrameState, context: &DisplayContext) -> LayerOutput;

    /// Layer priority for composition (lower = background, higher = foreground)
    fn priority(&self) -> i32 {
        0
    }

    fn name(&self) -> &'static str;

    /// Update rate in Hz, None when the layer steps every frame
    fn target_hz(&self) -> Option<f32> {
        None
    }
}

/// Core layer logic - implemented by specific layers
pub trait LayerLogic: Clone {
    /// Advance layer state by `delta` seconds
    fn update(&self, delta: f32, frame: &FrameState) -> Self;

    /// Render layer output
    fn render(&self, frame: &FrameState, context: &DisplayContext) -> LayerOutput;
}

/// Layer that manages its own update timing with internal timer
pub struct TimedLayer<T: LayerLogic> {
    logic: T,
    timer: Option<FixedHz>,
    priority: i32,
    name: &'static str,
}

impl<T: LayerLogic> TimedLayer<T> {
    /// Create layer with specific update rate
    pub fn new(logic: T, hz: f32, priority: i32, name: &'static str) -> Self {
        Self {
            logic,
            timer: Some(FixedHz::new(hz)),
            priority,
            name,
        }
    }

    /// Layer whose logic steps on every frame
    pub fn every_frame(logic: T, priority: i32, name: &'static str) -> Self {
        Self {
            logic,
            timer: None,
            priority,
            name,
        }
    }
}

impl<T: LayerLogic + 'static> Layer for TimedLayer<T> {
    fn update(&self, frame: &FrameState) -> Box<dyn Layer> {
        let mut new_timer = self.timer;

        let fire = match new_timer.as_mut() {
            Some(timer) => timer.tick(frame.delta),
            None => true,
        };

        let new_logic = if fire {
            let step = self.timer.map_or(frame.delta, |timer| timer.interval);
            self.logic.update(step, frame)
        } else {
            self.logic.clone()
        };

        Box::new(TimedLayer {
            logic: new_logic,
            timer: new_timer,
            priority: self.priority,
            name: self.name,
        })
    }

    fn render(&self, frame: &FrameState, context: &DisplayContext) -> LayerOutput {
        self.logic.render(frame, context)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn target_hz(&self) -> Option<f32> {
        self.timer.map(|timer| timer.hz())
    }
}

/// Composable layer stack
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<Box<dyn Layer>>,
}

impl LayerStack {
    /// Create empty layer stack
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add layer and return new stack
    pub fn with_layer(mut self, layer: Box<dyn Layer>) -> Self {
        self.layers.push(layer);
        self.layers.sort_by_key(|l| l.priority());
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer names, back to front
    pub fn names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Update all layers - functional transformation
    pub fn update(&self, frame: &FrameState) -> LayerStack {
        LayerStack {
            layers: self.layers.iter().map(|layer| layer.update(frame)).collect(),
        }
    }

    /// Aggregate all layer outputs, back to front
    pub fn render<'a>(
        &'a self,
        frame: &'a FrameState,
        context: &'a DisplayContext,
    ) -> impl Iterator<Item = LayerOutput> + 'a {
        self.layers.iter().map(move |layer| layer.render(frame, context))
    }

    /// Composite every layer over `background` into opaque RGBA8 bytes
    pub fn composite(&self, frame: &FrameState, context: &DisplayContext, background: Color) -> Vec<u8> {
        let mut target = vec![background.with_alpha(255); context.pixel_count()];

        for output in self.render(frame, context) {
            if !output.has_len(target.len()) {
                log::warn!(
                    "Skipping layer output with {} pixels and {:?} mask entries, expected {}",
                    output.pixels.len(),
                    output.alpha.as_ref().map(Vec::len),
                    target.len()
                );
                continue;
            }

            for (i, dst) in target.iter_mut().enumerate() {
                let coverage = output.coverage(i);
                if coverage <= 0.0 {
                    continue;
                }
                let src = output.pixels[i];
                let a = (coverage * src.alpha_f32() * 255.0).round() as u8;
                *dst = Rgba { a, ..src }.over(*dst);
            }
        }

        bytemuck::cast_slice(&target).to_vec()
    }
}
