use tracing::{debug, info, warn};

use crate::config::SutureConfig;
use crate::constraints::spring::{ConstraintSink, SpringSet};
use crate::error::{SutureError, SutureResult};
use crate::math::{rest_length, Axis};
use crate::selection::{ManualSelector, PointSelector, Selection, SelectionInputs};

/// Step notifications delivered by the host simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimulationEvent {
    BeginStep { dt: f64 },
    /// All position updates of the step have completed.
    EndStep { dt: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SutureState {
    Uninitialized,
    Ready,
    Disabled,
}

/// Where the synthesizer writes its spring.
pub enum SinkBinding<'a> {
    Unbound,
    /// Handed over by value, or default-constructed by `init`.
    Owned(Box<dyn ConstraintSink + 'a>),
    /// Owned by the host, lent for the synthesizer's lifetime.
    Borrowed(&'a mut dyn ConstraintSink),
}

/// The suture written during one update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SutureUpdate {
    pub index_a: u32,
    pub index_b: u32,
    pub rest_length: f64,
    /// The selection read a NaN or infinite coordinate, or the rest length
    /// itself is not finite.
    pub non_finite_input: bool,
}

/// Why an update left the constraint untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkipReason {
    Uninitialized,
    Disabled,
    Unbound,
    /// Selection produced no pair (empty body, degenerate, incomplete pick).
    NoPair(Selection),
    /// No pair, and the selection read a NaN or infinite coordinate.
    NonFiniteInput(Selection),
}

/// Report of one update. Informational only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateOutcome {
    Updated(SutureUpdate),
    Skipped(SkipReason),
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }
}

/// Keeps a single spring attached to the current anchor pair of a body.
///
/// One synthesizer drives exactly one suture; run several synthesizers,
/// each bound to its own sink, for several simultaneous sutures.
///
/// Call [`update`](Self::update) (or [`handle_event`](Self::handle_event)
/// with `EndStep`) after the step's position updates and before forces are
/// evaluated. When no pair can be selected the previous spring is kept.
pub struct SutureSynthesizer<'a> {
    config: SutureConfig,
    selector: PointSelector,
    sink: SinkBinding<'a>,
    state: SutureState,
    fault: Option<SutureError>,
}

impl<'a> SutureSynthesizer<'a> {
    pub fn new(config: SutureConfig) -> Self {
        let selector = PointSelector::from_config(&config);
        Self {
            config,
            selector,
            sink: SinkBinding::Unbound,
            state: SutureState::Uninitialized,
            fault: None,
        }
    }

    pub fn config(&self) -> &SutureConfig {
        &self.config
    }

    pub fn selector(&self) -> &PointSelector {
        &self.selector
    }

    pub fn state(&self) -> SutureState {
        self.state
    }

    /// The error that disabled the synthesizer at its last `init`, if any.
    pub fn fault(&self) -> Option<&SutureError> {
        self.fault.as_ref()
    }

    /// Bind a sink the synthesizer will own.
    pub fn bind_sink<S: ConstraintSink + 'a>(&mut self, sink: S) {
        self.sink = SinkBinding::Owned(Box::new(sink));
    }

    /// Bind a sink the host keeps ownership of.
    pub fn bind_sink_ref(&mut self, sink: &'a mut dyn ConstraintSink) {
        self.sink = SinkBinding::Borrowed(sink);
    }

    /// Read access for the force stage, once this step's update has returned.
    pub fn sink(&self) -> Option<&dyn ConstraintSink> {
        match &self.sink {
            SinkBinding::Unbound => None,
            SinkBinding::Owned(sink) => Some(sink.as_ref()),
            SinkBinding::Borrowed(sink) => Some(&**sink),
        }
    }

    fn sink_mut(&mut self) -> Option<&mut (dyn ConstraintSink + 'a)> {
        match &mut self.sink {
            SinkBinding::Unbound => None,
            SinkBinding::Owned(sink) => Some(sink.as_mut()),
            SinkBinding::Borrowed(sink) => Some(&mut **sink),
        }
    }

    /// Rest length of the current suture, or `None` before the first pair
    /// has been written. A NaN here comes from faulty positions.
    pub fn rest_length(&self) -> Option<f64> {
        self.sink()?.rest_lengths().first().copied()
    }

    /// Bind a default spring if none is bound and check that the input the
    /// current strategy needs is present.
    ///
    /// On error the synthesizer is `Disabled` until reconfigured and
    /// initialized again; it never panics.
    pub fn init(&mut self, inputs: &SelectionInputs<'_>) -> SutureResult<()> {
        if let Err(err) = self.config.validate() {
            return Err(self.disable(err));
        }

        if matches!(self.sink, SinkBinding::Unbound) {
            debug!(
                stiffness = self.config.default_stiffness,
                damping = self.config.default_damping,
                "binding default suture spring"
            );
            self.bind_sink(SpringSet::new(
                self.config.default_stiffness,
                self.config.default_damping,
            ));
        }

        let required = self.selector.required_input();
        if !inputs.has(required) {
            return Err(self.disable(SutureError::MissingDependency { input: required }));
        }

        self.fault = None;
        self.state = if self.config.enabled {
            SutureState::Ready
        } else {
            SutureState::Disabled
        };
        Ok(())
    }

    fn disable(&mut self, err: SutureError) -> SutureError {
        warn!(error = %err, "suture synthesizer disabled");
        self.state = SutureState::Disabled;
        self.fault = Some(err.clone());
        err
    }

    /// Runtime toggle. Has no effect on the state while uninitialized or
    /// disabled by a fault, but is remembered for the next `init`.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if self.state == SutureState::Uninitialized || self.fault.is_some() {
            return;
        }
        self.state = if enabled {
            SutureState::Ready
        } else {
            SutureState::Disabled
        };
    }

    /// Switch strategy. When the new strategy needs a different input the
    /// synthesizer returns to `Uninitialized` and must be initialized again.
    pub fn set_strategy(&mut self, selector: PointSelector) {
        let previous = self.selector.required_input();
        match selector {
            PointSelector::Manual(_) => self.config.auto_select = false,
            PointSelector::AutomaticExtremal(extremal) => {
                self.config.auto_select = true;
                self.config.axis = extremal.axis;
            }
        }
        self.selector = selector;
        if selector.required_input() != previous {
            self.state = SutureState::Uninitialized;
            if matches!(self.fault, Some(SutureError::MissingDependency { .. })) {
                self.fault = None;
            }
        }
    }

    pub fn set_auto_select(&mut self, auto_select: bool) {
        let selector = if auto_select {
            PointSelector::automatic(self.config.axis)
        } else {
            PointSelector::Manual(ManualSelector)
        };
        self.set_strategy(selector);
    }

    /// Axis used by the automatic strategy, now or once it is selected.
    pub fn set_axis(&mut self, axis: Axis) {
        self.config.axis = axis;
        if let PointSelector::AutomaticExtremal(extremal) = &mut self.selector {
            extremal.axis = axis;
        }
    }

    /// Dispatch a host event. Only `EndStep` triggers an update.
    pub fn handle_event(
        &mut self,
        event: &SimulationEvent,
        inputs: &SelectionInputs<'_>,
    ) -> Option<UpdateOutcome> {
        match *event {
            SimulationEvent::EndStep { dt } => Some(self.update(dt, inputs)),
            SimulationEvent::BeginStep { .. } => None,
        }
    }

    /// Re-select the anchors and rewrite the spring.
    ///
    /// `dt` is accepted for symmetry with the step signal; the rule is purely
    /// positional. Non-finite positions are written through unchanged.
    pub fn update(&mut self, _dt: f64, inputs: &SelectionInputs<'_>) -> UpdateOutcome {
        match self.state {
            SutureState::Uninitialized => {
                return UpdateOutcome::Skipped(SkipReason::Uninitialized)
            }
            SutureState::Disabled => return UpdateOutcome::Skipped(SkipReason::Disabled),
            SutureState::Ready => {}
        }

        let scan = self.selector.scan(inputs);
        let (a, b) = match scan.selection {
            Selection::Pair(a, b) => (a, b),
            other if scan.non_finite => {
                warn!(
                    selection = ?other,
                    "no suture pair this step: non-finite particle coordinate"
                );
                return UpdateOutcome::Skipped(SkipReason::NonFiniteInput(other));
            }
            other => {
                debug!(selection = ?other, "no suture pair this step");
                return UpdateOutcome::Skipped(SkipReason::NoPair(other));
            }
        };

        let Some(sink) = self.sink_mut() else {
            return UpdateOutcome::Skipped(SkipReason::Unbound);
        };

        let length = rest_length(a.position, b.position);
        sink.set_endpoints_a(vec![a.index]);
        sink.set_endpoints_b(vec![b.index]);
        sink.set_rest_lengths(vec![length]);

        let non_finite_input = scan.non_finite || !length.is_finite();
        if !non_finite_input {
            info!(
                index_a = a.index,
                index_b = b.index,
                rest_length = length,
                "suture updated"
            );
        } else {
            warn!(
                index_a = a.index,
                index_b = b.index,
                rest_length = length,
                "suture updated from non-finite particle coordinates"
            );
        }

        UpdateOutcome::Updated(SutureUpdate {
            index_a: a.index,
            index_b: b.index,
            rest_length: length,
            non_finite_input,
        })
    }
}
