use crate::{
    Environment, FrameSource, LoopConfig, LoopError, LoopState, Surface, TickOutcome, UiEvent,
};
use restyle_base::Tensor;
use restyle_infer::Runner;

/// Runner with the tensor names the loop feeds and reads.
struct BoundRunner {
    runner: Runner,
    input_name: String,
    output_name: String,
}

/// Capture-infer-render loop.
///
/// Starts paused. `toggle_pause` flips between paused and running; going to
/// running schedules a tick, and each rendered tick schedules the next one on
/// the following frame callback, so there is only ever one tick chain.
pub struct Controller<S: FrameSource, V: Surface> {
    config: LoopConfig,
    state: LoopState,
    runner: Option<BoundRunner>,
    source: Option<S>,
    surface: V,
    tick_pending: bool,
    /// Status text of the last failed initialization.
    init_error: Option<String>,
}

impl<S: FrameSource, V: Surface> Controller<S, V> {
    pub fn new(config: LoopConfig, surface: V) -> Self {
        Self {
            config,
            state: LoopState::Paused,
            runner: None,
            source: None,
            surface,
            tick_pending: false,
            init_error: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    /// Backend the runner was loaded on, once initialized.
    pub fn backend_name(&self) -> Option<&str> {
        self.runner.as_ref().map(|bound| bound.runner.backend_name())
    }

    pub fn is_initialized(&self) -> bool {
        self.runner.is_some() && self.source.is_some()
    }

    /// Whether a tick will run on the next frame callback.
    pub fn tick_pending(&self) -> bool {
        self.tick_pending
    }

    /// Load the runner and open the camera.
    ///
    /// On failure the error is logged and shown on the status label as
    /// `Error: <message>`, then returned. The controller stays usable; ticks
    /// fail with `NotInitialized` until a later call succeeds.
    pub async fn initialize<E>(&mut self, env: &mut E) -> Result<(), LoopError>
    where
        E: Environment<Source = S>,
    {
        match self.try_initialize(env).await {
            Ok(()) => {
                self.init_error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("initialization failed: {}", e);
                let status = format!("Error: {e}");
                self.surface.set_status(&status);
                self.init_error = Some(status);
                Err(e)
            }
        }
    }

    async fn try_initialize<E>(&mut self, env: &mut E) -> Result<(), LoopError>
    where
        E: Environment<Source = S>,
    {
        let runner = env.load_runner(self.config.model_path()).await?;
        log::info!("backend: {}", runner.backend_name());

        let input_name = runner
            .input_names()
            .first()
            .cloned()
            .ok_or_else(|| LoopError::MissingTensor("model has no inputs".to_string()))?;
        let output_name = runner
            .output_names()
            .first()
            .cloned()
            .ok_or_else(|| LoopError::MissingTensor("model has no outputs".to_string()))?;
        log::debug!("feeding '{}', reading '{}'", input_name, output_name);

        self.runner = Some(BoundRunner {
            runner,
            input_name,
            output_name,
        });

        self.source = Some(env.open_camera().await?);
        Ok(())
    }

    /// Flip between paused and running, returning the new state.
    pub fn toggle_pause(&mut self) -> LoopState {
        self.state = self.state.toggled();
        self.surface.set_status(self.state.label());
        if self.state == LoopState::Running {
            self.tick_pending = true;
        }
        log::info!("{}", self.state);
        self.state
    }

    /// One capture-infer-render step.
    pub async fn tick(&mut self) -> Result<TickOutcome, LoopError> {
        if self.state == LoopState::Paused {
            return Ok(TickOutcome::Skipped);
        }

        let bound = self.runner.as_mut().ok_or(LoopError::NotInitialized)?;
        let source = self.source.as_mut().ok_or(LoopError::NotInitialized)?;

        let array = source.image_array(self.config.input_options()).await?;
        let input = Tensor::new(self.config.input_shape(), array)?;

        let mut outputs = bound.runner.run(&[(bound.input_name.as_str(), input)])?;
        let output = outputs.remove(&bound.output_name).ok_or_else(|| {
            LoopError::MissingTensor(format!("output '{}' not produced", bound.output_name))
        })?;

        self.surface.draw_image_array(
            &output.data,
            self.config.height(),
            self.config.width(),
            self.config.output_options(),
        )?;
        Ok(TickOutcome::Rendered)
    }

    fn apply(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::TogglePause => {
                self.toggle_pause();
                true
            }
            UiEvent::Quit => false,
        }
    }

    /// Drive the loop until the surface closes or a quit event arrives.
    ///
    /// Each iteration waits for the next frame callback, applies the user
    /// events that came with it and then runs the pending tick, if any.
    /// Resuming without a runner or camera ends the tick chain and puts the
    /// initialization error back on the status label; other tick errors are
    /// returned.
    pub async fn run(&mut self) -> Result<(), LoopError> {
        while self.surface.is_open() {
            let events = self.surface.next_frame();
            if !self.surface.is_open() {
                break;
            }
            for event in events {
                if !self.apply(event) {
                    log::info!("quit requested");
                    return Ok(());
                }
            }

            if std::mem::take(&mut self.tick_pending) {
                match self.tick().await {
                    Ok(TickOutcome::Rendered) => self.tick_pending = true,
                    Ok(TickOutcome::Skipped) => {}
                    Err(LoopError::NotInitialized) => {
                        log::warn!("nothing to render: runner or camera not initialized");
                        if let Some(status) = &self.init_error {
                            self.surface.set_status(status);
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        log::info!("surface closed");
        Ok(())
    }
}
