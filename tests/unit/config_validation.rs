//! Unit tests for configuration validation.

use carousel_motion::error::{ConfigError, Error};
use carousel_motion::{validate_config, SystemConfig};

fn parse(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("TOML should parse")
}

#[test]
fn valid_two_axis_config() {
    let config = parse(
        r#"
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

[sampler]
carousel = "carousel"
plunger = "plunger"
press_depth_mm = 50.0
"#,
    );

    assert!(validate_config(&config).is_ok());
}

#[test]
fn rejects_zero_homing_speed() {
    let config = parse(
        r#"
[axes.carousel]
name = "Carousel Disk"
steps_per_revolution = 200
microsteps = 8
max_speed_steps_per_sec = 800.0
acceleration_steps_per_sec2 = 400.0
station_count = 10

[axes.carousel.homing]
speed_steps_per_sec = 0.0
backoff_steps = 20
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidHomingSpeed(_)))
    ));
}

#[test]
fn rejects_station_count_that_does_not_divide() {
    let config = parse(
        r#"
[axes.carousel]
name = "Carousel Disk"
steps_per_revolution = 200
microsteps = 8
max_speed_steps_per_sec = 800.0
acceleration_steps_per_sec2 = 400.0
station_count = 7

[axes.carousel.homing]
speed_steps_per_sec = -200.0
backoff_steps = 20
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStationCount {
            stations: 7,
            steps_per_revolution: 1600,
        }))
    ));
}

#[test]
fn rejects_travel_limits_on_rotary_axis() {
    let config = parse(
        r#"
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

[axes.carousel.travel]
min_mm = 0.0
max_mm = 60.0
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::TravelLimitsUnsupported(_)))
    ));
}

#[test]
fn rejects_sampler_with_wrong_axis_kind() {
    // Sampler declares the linear plunger as the carousel.
    let config = parse(
        r#"
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

[sampler]
carousel = "plunger"
plunger = "plunger"
press_depth_mm = 50.0
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::WrongAxisKind {
            expected: "rotary",
            ..
        }))
    ));
}

#[test]
fn rejects_missing_sampler_axis() {
    let config = parse(
        r#"
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

[sampler]
carousel = "carousel"
plunger = "ghost"
press_depth_mm = 50.0
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::AxisNotFound(_)))
    ));
}
