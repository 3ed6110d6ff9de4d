//! Unit tests for TOML configuration parsing.

use carousel_motion::config::units::Microsteps;
use carousel_motion::config::LimitPolicy;
use carousel_motion::SystemConfig;

const MINIMAL_CONFIG: &str = r#"
[axes.carousel]
name = "Carousel Disk"
steps_per_revolution = 200
microsteps = 8
max_speed_steps_per_sec = 800.0
acceleration_steps_per_sec2 = 400.0
station_count = 10

[axes.carousel.homing]
speed_steps_per_sec = -200.0
backoff_steps = 20
"#;

const FULL_CONFIG: &str = r#"
[axes.carousel]
name = "Carousel Disk"
steps_per_revolution = 200
microsteps = 8
max_speed_steps_per_sec = 800.0
acceleration_steps_per_sec2 = 400.0
invert_direction = true
station_count = 10

[axes.carousel.homing]
speed_steps_per_sec = -200.0
backoff_steps = 20
min_contact_ms = 5
timeout_ms = 10000
home_station = 1

[axes.plunger]
name = "Plunger"
steps_per_revolution = 200
microsteps = 8
max_speed_steps_per_sec = 1000.0
acceleration_steps_per_sec2 = 500.0
lead_mm_per_rev = 8.0

[axes.plunger.homing]
speed_steps_per_sec = -400.0
backoff_steps = 400

[axes.plunger.travel]
min_mm = 0.0
max_mm = 60.0
policy = "clamp"

[sampler]
carousel = "carousel"
plunger = "plunger"
press_depth_mm = 50.0
"#;

// Helper to parse config using toml crate directly
fn parse(toml_str: &str) -> Result<SystemConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

#[test]
fn parse_minimal_axis_config() {
    let config = parse(MINIMAL_CONFIG).expect("Should parse minimal config");

    let axis = config.axis("carousel").expect("Axis should exist");
    assert_eq!(axis.name.as_str(), "Carousel Disk");
    assert_eq!(axis.steps_per_revolution, 200);
    assert_eq!(axis.microsteps, Microsteps::EIGHTH);
    assert!((axis.max_speed.0 - 800.0).abs() < 0.01);
    assert!((axis.acceleration.0 - 400.0).abs() < 0.01);
    assert!(!axis.invert_direction);
    assert_eq!(axis.station_count, Some(10));
    assert!(axis.lead_mm_per_rev.is_none());
}

#[test]
fn parse_homing_defaults() {
    let config = parse(MINIMAL_CONFIG).expect("Should parse minimal config");

    let homing = &config.axis("carousel").unwrap().homing;
    assert!((homing.speed.0 - (-200.0)).abs() < 0.01);
    assert_eq!(homing.backoff_steps, 20);
    // Source-faithful defaults: single live read, 30 s seek deadline.
    assert_eq!(homing.min_contact_ms, 0);
    assert_eq!(homing.timeout_ms, 30_000);
    assert_eq!(homing.home_station, 0);
}

#[test]
fn parse_full_axis_config() {
    let config = parse(FULL_CONFIG).expect("Should parse full config");

    let carousel = config.axis("carousel").expect("Carousel should exist");
    assert!(carousel.invert_direction);
    assert_eq!(carousel.homing.min_contact_ms, 5);
    assert_eq!(carousel.homing.timeout_ms, 10_000);
    assert_eq!(carousel.homing.home_station, 1);

    let plunger = config.axis("plunger").expect("Plunger should exist");
    assert_eq!(plunger.lead_mm_per_rev, Some(8.0));

    let travel = plunger.travel.as_ref().expect("Should have travel limits");
    assert!((travel.min.0 - 0.0).abs() < 0.01);
    assert!((travel.max.0 - 60.0).abs() < 0.01);
    assert_eq!(travel.policy, LimitPolicy::Clamp);
}

#[test]
fn parse_sampler_routing() {
    let config = parse(FULL_CONFIG).expect("Should parse config");

    let sampler = config.sampler.as_ref().expect("Sampler should exist");
    assert_eq!(sampler.carousel.as_str(), "carousel");
    assert_eq!(sampler.plunger.as_str(), "plunger");
    assert!((sampler.press_depth.0 - 50.0).abs() < 0.01);
}

#[test]
fn parse_rejects_invalid_microsteps() {
    let toml = r#"
[axes.carousel]
name = "Carousel Disk"
steps_per_revolution = 200
microsteps = 3
max_speed_steps_per_sec = 800.0
acceleration_steps_per_sec2 = 400.0
station_count = 10

[axes.carousel.homing]
speed_steps_per_sec = -200.0
backoff_steps = 20
"#;

    assert!(parse(toml).is_err());
}
