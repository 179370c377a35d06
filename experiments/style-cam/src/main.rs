use restyle_base::{init_file_logger, init_stdout_logger};
use restyle_loop::{Controller, LoopConfig};
use style_cam::{AppConfig, DeviceEnvironment, WindowSurface};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    match &config.log_dir {
        Some(dir) => init_file_logger(dir)?,
        None => init_stdout_logger(),
    }

    log::info!(
        "style-cam: model {}, camera {}, device {}",
        config.model_path.display(),
        config.camera_device,
        config.device
    );
    log::info!("controls: Space/Enter to pause or resume, Escape to quit");

    let loop_config = LoopConfig::default().with_model_path(&config.model_path);
    let surface = WindowSurface::new(loop_config.width(), loop_config.height())?;
    let mut environment = DeviceEnvironment::new(&config);
    let mut controller = Controller::new(loop_config, surface);

    // a failed start stays on screen as the window title
    let _ = controller.initialize(&mut environment).await;

    controller.run().await?;
    log::info!("exiting");
    Ok(())
}
