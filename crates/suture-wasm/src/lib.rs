use glam::DVec3;
use suture_core::config::SutureConfig;
use suture_core::constraints::spring::SpringRecord;
use suture_core::math::Axis;
use suture_core::particle::ParticleSet;
use suture_core::picking::PickState;
use suture_core::selection::SelectionInputs;
use suture_core::synthesizer::{SimulationEvent, SutureState, SutureSynthesizer};
use wasm_bindgen::prelude::*;

/// Host-side body, picks and suture, stepped from JS.
#[wasm_bindgen]
pub struct SutureWorld {
    body: ParticleSet,
    picks: PickState,
    synth: SutureSynthesizer<'static>,
    spring_buffer: Vec<SpringRecord>,
}

#[wasm_bindgen]
impl SutureWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize) -> SutureWorld {
        web_sys::console::log_1(
            &format!("WASM SutureWorld created: {} particles", particle_count).into(),
        );

        let mut world = SutureWorld {
            body: ParticleSet::new(particle_count),
            picks: PickState::new(),
            synth: SutureSynthesizer::new(SutureConfig::default()),
            spring_buffer: Vec::new(),
        };
        world.reinit();
        world
    }

    /// Overwrite particle positions from packed xyz triples. Extra values
    /// are ignored; missing particles keep their position.
    #[wasm_bindgen]
    pub fn set_positions(&mut self, xyz: &[f64]) {
        for (p, c) in self.body.position.iter_mut().zip(xyz.chunks_exact(3)) {
            *p = DVec3::new(c[0], c[1], c[2]);
        }
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.body.count
    }

    /// Pick particle `index` at its current position. Returns `false` if
    /// the index is outside the body.
    #[wasm_bindgen]
    pub fn pick(&mut self, index: u32) -> bool {
        match self.picks.pick(&self.body, index) {
            Ok(()) => true,
            Err(err) => {
                web_sys::console::warn_1(&err.to_string().into());
                false
            }
        }
    }

    #[wasm_bindgen]
    pub fn clear_picks(&mut self) {
        self.picks.clear();
    }

    #[wasm_bindgen]
    pub fn pick_count(&self) -> usize {
        self.picks.len()
    }

    #[wasm_bindgen]
    pub fn set_auto_select(&mut self, auto_select: bool) {
        self.synth.set_auto_select(auto_select);
        self.reinit();
    }

    #[wasm_bindgen]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.synth.set_enabled(enabled);
    }

    /// 0 = x, 1 = y, 2 = z. Other values are ignored.
    #[wasm_bindgen]
    pub fn set_axis(&mut self, axis: u32) {
        if let Some(axis) = Axis::from_index(axis) {
            self.synth.set_axis(axis);
        }
    }

    #[wasm_bindgen]
    pub fn is_ready(&self) -> bool {
        self.synth.state() == SutureState::Ready
    }

    /// Run the end-of-step suture update. Returns the elapsed time in ms.
    #[wasm_bindgen]
    pub fn end_step(&mut self, dt: f64) -> f32 {
        let start = js_sys::Date::now();
        if self.picks.refresh(&self.body).is_err() {
            self.picks.clear();
        }
        let inputs = SelectionInputs::body(&self.body).with_picker(&self.picks);
        self.synth.handle_event(&SimulationEvent::EndStep { dt }, &inputs);
        self.write_spring_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    /// Whether a suture has been formed.
    #[wasm_bindgen]
    pub fn has_suture(&self) -> bool {
        self.synth.rest_length().is_some()
    }

    /// Current rest length (`undefined` before the first suture). NaN means
    /// the positions it was measured from were faulty.
    #[wasm_bindgen]
    pub fn rest_length(&self) -> Option<f64> {
        self.synth.rest_length()
    }

    #[wasm_bindgen]
    pub fn get_spring_buffer_ptr(&self) -> *const u8 {
        bytemuck::cast_slice::<SpringRecord, u8>(&self.spring_buffer).as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_spring_buffer_byte_length(&self) -> usize {
        self.spring_buffer.len() * std::mem::size_of::<SpringRecord>()
    }
}

impl SutureWorld {
    fn reinit(&mut self) {
        let inputs = SelectionInputs::body(&self.body).with_picker(&self.picks);
        if let Err(err) = self.synth.init(&inputs) {
            web_sys::console::warn_1(&format!("suture disabled: {}", err).into());
        }
    }

    fn write_spring_output(&mut self) {
        self.spring_buffer = self
            .synth
            .sink()
            .map(|sink| sink.records())
            .unwrap_or_default();
    }
}
