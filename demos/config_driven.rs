//! Configuration-driven setup example.
//!
//! Demonstrates parsing and validating a sampler configuration, the
//! geometry derived from it, and building both axes against mock
//! hardware. No motion is performed.

use carousel_motion::config::{AxisGeometry, AxisKind};
use carousel_motion::hal::{DriverEnable, StepDirPins};
use carousel_motion::{parse_config, Axis, Millimeters};

/// Mock delay provider for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        // In real code, this would use a hardware timer
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Mock pin for demonstration.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state)
    }
}

const CONFIG: &str = r#"
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
min_contact_ms = 2
timeout_ms = 15000

[axes.plunger.travel]
min_mm = 0.0
max_mm = 60.0

[sampler]
carousel = "carousel"
plunger = "plunger"
press_depth_mm = 50.0
"#;

fn main() {
    println!("=== Configuration-Driven Setup Example ===\n");

    // parse_config validates as part of parsing.
    let config = parse_config(CONFIG).expect("Failed to parse config");

    println!("Loaded configuration with {} axis(es)", config.axes.len());

    for name in config.axis_names() {
        let axis_config = config.axis(name).unwrap();
        let geometry = AxisGeometry::from_config(axis_config);

        println!("\nAxis '{}' ({}):", name, axis_config.name);
        println!("  Steps per revolution: {}", geometry.steps_per_revolution);
        match &geometry.kind {
            AxisKind::Rotary {
                station_count,
                steps_per_station,
            } => {
                println!("  Kind: rotary, {} stations", station_count);
                println!("  Steps per station: {}", steps_per_station);
            }
            AxisKind::Linear { steps_per_mm } => {
                println!("  Kind: linear, {} steps/mm", steps_per_mm);
                if let Some(target) = geometry.depth_target(Millimeters(50.0)) {
                    println!("  50 mm press target: {} steps", target.value());
                }
            }
        }
        println!(
            "  Homing: {} steps/s, back off {} steps, {} ms deadline",
            axis_config.homing.speed.value(),
            axis_config.homing.backoff_steps,
            axis_config.homing.timeout_ms
        );
    }

    if let Some(ref sampler) = config.sampler {
        println!(
            "\nSampler routing: carousel='{}' plunger='{}' press depth {} mm",
            sampler.carousel, sampler.plunger, sampler.press_depth.0
        );
    }

    // Build both axes against mock hardware. TB6600 enable is active low
    // and energized once at startup.
    let mut carousel_enable = DriverEnable::new(MockPin::new());
    carousel_enable.enable().expect("enable carousel driver");
    let mut plunger_enable = DriverEnable::new(MockPin::new());
    plunger_enable.enable().expect("enable plunger driver");

    let carousel = Axis::builder()
        .device(StepDirPins::new(MockPin::new(), MockPin::new(), MockDelay))
        .switch(MockPin::new())
        .from_config(&config, "carousel")
        .expect("carousel in config")
        .build()
        .expect("Failed to build carousel");

    let plunger = Axis::builder()
        .device(StepDirPins::new(MockPin::new(), MockPin::new(), MockDelay))
        .switch(MockPin::new())
        .from_config(&config, "plunger")
        .expect("plunger in config")
        .build()
        .expect("Failed to build plunger");

    println!(
        "\nBuilt axes: '{}' ({}) and '{}' ({})",
        carousel.name(),
        carousel.status(),
        plunger.name(),
        plunger.status()
    );
    println!("Both axes must be homed before indexed moves are accepted.");
}
