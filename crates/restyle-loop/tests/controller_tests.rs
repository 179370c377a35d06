use restyle_base::Tensor;
use restyle_image::{Color, ImageArrayOptions, Order};
use restyle_infer::{InferError, Runner, Session};
use restyle_loop::{
    Controller, Environment, FrameSource, LoopConfig, LoopError, LoopState, Surface, TickOutcome,
    UiEvent,
};
use restyle_video::CameraError;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Source that records the options of every conversion it is asked for.
struct FakeSource {
    calls: Rc<RefCell<Vec<ImageArrayOptions>>>,
}

impl FrameSource for FakeSource {
    async fn image_array(&mut self, options: &ImageArrayOptions) -> Result<Vec<f32>, LoopError> {
        self.calls.borrow_mut().push(options.clone());
        let len = options.dst_w.unwrap_or(1) * options.dst_h.unwrap_or(1) * options.color.channels();
        Ok(vec![0.25; len])
    }
}

/// Session that records input shapes and answers with a constant output.
struct FakeSession {
    inputs: Vec<String>,
    outputs: Vec<String>,
    runs: Rc<RefCell<Vec<(String, Vec<usize>)>>>,
    fail: bool,
}

impl Session for FakeSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let (name, tensor) = &inputs[0];
        self.runs.borrow_mut().push((name.to_string(), tensor.shape.clone()));
        if self.fail {
            return Err(InferError::BackendError("device lost".to_string()));
        }
        let output = Tensor::new(tensor.shape.clone(), vec![0.5; tensor.len()])?;
        Ok(HashMap::from([(self.outputs[0].clone(), output)]))
    }

    fn input_names(&self) -> &[String] {
        &self.inputs
    }

    fn output_names(&self) -> &[String] {
        &self.outputs
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Draw {
    len: usize,
    first: f32,
    height: usize,
    width: usize,
    options: ImageArrayOptions,
}

/// Surface that replays a script of frame callbacks, then closes.
#[derive(Default)]
struct FakeSurface {
    script: VecDeque<Vec<UiEvent>>,
    open: bool,
    statuses: Vec<String>,
    draws: Vec<Draw>,
}

impl FakeSurface {
    fn scripted(frames: Vec<Vec<UiEvent>>) -> Self {
        Self {
            script: frames.into(),
            open: true,
            ..Default::default()
        }
    }

    fn status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl Surface for FakeSurface {
    fn draw_image_array(
        &mut self,
        data: &[f32],
        height: usize,
        width: usize,
        options: &ImageArrayOptions,
    ) -> Result<(), LoopError> {
        self.draws.push(Draw {
            len: data.len(),
            first: data[0],
            height,
            width,
            options: options.clone(),
        });
        Ok(())
    }

    fn set_status(&mut self, status: &str) {
        self.statuses.push(status.to_string());
    }

    fn next_frame(&mut self) -> Vec<UiEvent> {
        match self.script.pop_front() {
            Some(events) => events,
            None => {
                self.open = false;
                Vec::new()
            }
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[derive(Default)]
struct Recorded {
    conversions: Rc<RefCell<Vec<ImageArrayOptions>>>,
    runs: Rc<RefCell<Vec<(String, Vec<usize>)>>>,
    loaded_from: Rc<RefCell<Vec<PathBuf>>>,
}

struct FakeEnvironment {
    recorded: Recorded,
    load_error: Option<String>,
    camera_error: Option<String>,
    outputs: Vec<String>,
    session_fails: bool,
}

impl FakeEnvironment {
    fn new() -> Self {
        Self {
            recorded: Recorded::default(),
            load_error: None,
            camera_error: None,
            outputs: vec!["output".to_string()],
            session_fails: false,
        }
    }
}

impl Environment for FakeEnvironment {
    type Source = FakeSource;

    async fn load_runner(&mut self, path: &Path) -> Result<Runner, LoopError> {
        self.recorded.loaded_from.borrow_mut().push(path.to_path_buf());
        if let Some(msg) = &self.load_error {
            return Err(InferError::ModelLoad(msg.clone()).into());
        }
        Ok(Runner::new(
            "fake",
            Box::new(FakeSession {
                inputs: vec!["input".to_string()],
                outputs: self.outputs.clone(),
                runs: Rc::clone(&self.recorded.runs),
                fail: self.session_fails,
            }),
        ))
    }

    async fn open_camera(&mut self) -> Result<FakeSource, LoopError> {
        if let Some(msg) = &self.camera_error {
            return Err(CameraError::Device(msg.clone()).into());
        }
        Ok(FakeSource {
            calls: Rc::clone(&self.recorded.conversions),
        })
    }
}

fn expected_options() -> ImageArrayOptions {
    ImageArrayOptions {
        dst_w: Some(256),
        dst_h: Some(256),
        scale: [255.0, 255.0, 255.0],
        bias: [103.939, 116.779, 123.68],
        order: Order::Hwc,
        color: Color::Bgr,
        ..Default::default()
    }
}

async fn initialized(
    env: &mut FakeEnvironment,
    surface: FakeSurface,
) -> Controller<FakeSource, FakeSurface> {
    let mut controller = Controller::new(LoopConfig::default(), surface);
    controller.initialize(env).await.unwrap();
    controller
}

#[tokio::test]
async fn test_initial_state_is_paused() {
    let mut env = FakeEnvironment::new();
    let controller = initialized(&mut env, FakeSurface::default()).await;

    assert_eq!(controller.state(), LoopState::Paused);
    assert!(controller.is_initialized());
    assert!(!controller.tick_pending());
    assert_eq!(controller.backend_name(), Some("fake"));
    assert_eq!(env.recorded.loaded_from.borrow().as_slice(), [PathBuf::from("./output")]);
}

#[tokio::test]
async fn test_toggle_once_runs() {
    let mut env = FakeEnvironment::new();
    let mut controller = initialized(&mut env, FakeSurface::default()).await;

    assert_eq!(controller.toggle_pause(), LoopState::Running);
    assert_eq!(controller.surface().status(), Some("Running"));
    assert!(controller.tick_pending());
}

#[tokio::test]
async fn test_toggle_twice_pauses_and_stops_drawing() {
    let mut env = FakeEnvironment::new();
    let mut controller = initialized(&mut env, FakeSurface::default()).await;

    controller.toggle_pause();
    assert_eq!(controller.toggle_pause(), LoopState::Paused);
    assert_eq!(controller.surface().status(), Some("Paused"));

    assert_eq!(controller.tick().await.unwrap(), TickOutcome::Skipped);
    assert!(controller.surface().draws.is_empty());
    assert!(env.recorded.conversions.borrow().is_empty());
}

#[tokio::test]
async fn test_tick_converts_runs_and_draws_once() {
    let mut env = FakeEnvironment::new();
    let mut controller = initialized(&mut env, FakeSurface::default()).await;
    controller.toggle_pause();

    assert_eq!(controller.tick().await.unwrap(), TickOutcome::Rendered);

    assert_eq!(env.recorded.conversions.borrow().as_slice(), [expected_options()]);
    assert_eq!(
        env.recorded.runs.borrow().as_slice(),
        [("input".to_string(), vec![1, 256, 256, 3])]
    );

    let draws = &controller.surface().draws;
    assert_eq!(draws.len(), 1);
    assert_eq!(
        draws[0],
        Draw {
            len: 256 * 256 * 3,
            first: 0.5,
            height: 256,
            width: 256,
            options: expected_options(),
        }
    );
}

#[tokio::test]
async fn test_load_failure_sets_error_status() {
    let mut env = FakeEnvironment::new();
    env.load_error = Some("no model at ./output".to_string());
    let mut controller = Controller::new(LoopConfig::default(), FakeSurface::default());

    let err = controller.initialize(&mut env).await.unwrap_err();
    let status = controller.surface().status().unwrap();
    assert!(status.starts_with("Error: "));
    assert_eq!(status, format!("Error: {err}"));
    assert!(status.contains("no model at ./output"));
    assert!(!controller.is_initialized());
    assert_eq!(controller.state(), LoopState::Paused);
}

#[tokio::test]
async fn test_camera_failure_keeps_runner() {
    let mut env = FakeEnvironment::new();
    env.camera_error = Some("/dev/video0 busy".to_string());
    let mut controller = Controller::new(LoopConfig::default(), FakeSurface::default());

    assert!(controller.initialize(&mut env).await.is_err());
    assert_eq!(controller.surface().status(), Some("Error: device error: /dev/video0 busy"));
    assert_eq!(controller.backend_name(), Some("fake"));
    assert!(!controller.is_initialized());
}

#[tokio::test]
async fn test_model_without_outputs_fails_initialization() {
    let mut env = FakeEnvironment::new();
    env.outputs.clear();
    let mut controller = Controller::new(LoopConfig::default(), FakeSurface::default());

    let err = controller.initialize(&mut env).await.unwrap_err();
    assert!(matches!(err, LoopError::MissingTensor(_)));
    assert!(controller.surface().status().unwrap().starts_with("Error: "));
}

#[tokio::test]
async fn test_tick_before_initialize_fails() {
    let mut controller: Controller<FakeSource, FakeSurface> =
        Controller::new(LoopConfig::default(), FakeSurface::default());

    // toggling still works without a runner
    assert_eq!(controller.toggle_pause(), LoopState::Running);
    assert!(matches!(controller.tick().await, Err(LoopError::NotInitialized)));
}

#[tokio::test]
async fn test_run_renders_until_paused() {
    let surface = FakeSurface::scripted(vec![
        vec![UiEvent::TogglePause],
        vec![],
        vec![],
        vec![UiEvent::TogglePause],
        vec![],
        vec![],
    ]);
    let mut env = FakeEnvironment::new();
    let mut controller = initialized(&mut env, surface).await;

    controller.run().await.unwrap();

    assert_eq!(controller.surface().draws.len(), 3);
    assert_eq!(env.recorded.runs.borrow().len(), 3);
    assert_eq!(controller.surface().statuses, ["Running", "Paused"]);
    assert!(!controller.surface().is_open());
}

#[tokio::test]
async fn test_run_keeps_one_chain_across_quick_toggles() {
    let surface = FakeSurface::scripted(vec![
        vec![UiEvent::TogglePause, UiEvent::TogglePause, UiEvent::TogglePause],
        vec![],
    ]);
    let mut env = FakeEnvironment::new();
    let mut controller = initialized(&mut env, surface).await;

    controller.run().await.unwrap();

    // one tick per frame callback, never two
    assert_eq!(controller.surface().draws.len(), 2);
    assert_eq!(controller.state(), LoopState::Running);
}

#[tokio::test]
async fn test_run_stops_on_quit() {
    let surface = FakeSurface::scripted(vec![
        vec![UiEvent::TogglePause],
        vec![UiEvent::Quit],
        vec![],
        vec![],
    ]);
    let mut env = FakeEnvironment::new();
    let mut controller = initialized(&mut env, surface).await;

    controller.run().await.unwrap();

    assert_eq!(controller.surface().draws.len(), 1);
    assert!(controller.surface().is_open());
}

#[tokio::test]
async fn test_run_propagates_tick_error() {
    let surface = FakeSurface::scripted(vec![vec![UiEvent::TogglePause], vec![]]);
    let mut env = FakeEnvironment::new();
    env.session_fails = true;
    let mut controller = initialized(&mut env, surface).await;

    let err = controller.run().await.unwrap_err();
    assert!(matches!(err, LoopError::Infer(InferError::BackendError(_))));
    assert!(controller.surface().draws.is_empty());
}

#[tokio::test]
async fn test_custom_frame_size_flows_through() {
    let mut env = FakeEnvironment::new();
    let config = LoopConfig::default()
        .with_model_path("/models/candy")
        .with_frame_size(64, 32);
    let mut controller = Controller::new(config, FakeSurface::default());
    controller.initialize(&mut env).await.unwrap();
    controller.toggle_pause();
    controller.tick().await.unwrap();

    assert_eq!(env.recorded.loaded_from.borrow()[0], PathBuf::from("/models/candy"));
    assert_eq!(env.recorded.runs.borrow()[0].1, vec![1, 32, 64, 3]);
    let draw = &controller.surface().draws[0];
    assert_eq!((draw.height, draw.width, draw.len), (32, 64, 32 * 64 * 3));
}

#[tokio::test]
async fn test_run_survives_resume_after_failed_initialization() {
    let surface = FakeSurface::scripted(vec![
        vec![],
        vec![UiEvent::TogglePause],
        vec![],
        vec![UiEvent::TogglePause],
        vec![UiEvent::TogglePause],
    ]);
    let mut env = FakeEnvironment::new();
    env.load_error = Some("boom".to_string());
    let mut controller = Controller::new(LoopConfig::default(), surface);
    assert!(controller.initialize(&mut env).await.is_err());

    controller.run().await.unwrap();

    let error = "Error: model load error: boom";
    assert_eq!(
        controller.surface().statuses,
        [error, "Running", error, "Paused", "Running", error]
    );
    assert!(controller.surface().draws.is_empty());
    assert!(!controller.tick_pending());
    // the loop ended because the surface closed, not because of the error
    assert!(!controller.surface().is_open());
}
