use restyle_video::CameraConfig;

#[test]
fn test_default_config() {
    let config = CameraConfig::default();
    assert_eq!(config.device(), "/dev/video0");
    assert_eq!((config.width(), config.height()), (640, 480));
    assert_eq!(config.fps(), 30);
    assert_eq!(config.buffer_count(), 4);
}

#[test]
fn test_builder_overrides() {
    let config = CameraConfig::default()
        .with_device("/dev/video2")
        .with_width(320)
        .with_height(240)
        .with_fps(15)
        .with_buffer_count(2);
    assert_eq!(config.device(), "/dev/video2");
    assert_eq!((config.width(), config.height()), (320, 240));
    assert_eq!(config.fps(), 15);
    assert_eq!(config.buffer_count(), 2);
}
