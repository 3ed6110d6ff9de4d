//! Full sampling cycle demo.
//!
//! Drives both axes of the sampler through a simulated rig: home the
//! carousel and the plunger, index through every station, press the
//! syringe, and re-home the plunger — all from single-character commands
//! serviced by one cooperative control loop, exactly as a serial port
//! would feed them.
//!
//! Time is simulated (1 ms per loop iteration) so the demo finishes
//! instantly while exercising the same step timing the hardware would see.

use core::cell::Cell;
use core::convert::Infallible;
use core::time::Duration;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin};

use carousel_motion::motion::{StepContext, StepDevice};
use carousel_motion::{parse_config, Axis, Command, HomingEvent, HomingStatus};

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

[axes.plunger.travel]
min_mm = 0.0
max_mm = 60.0

[sampler]
carousel = "carousel"
plunger = "plunger"
press_depth_mm = 50.0
"#;

/// Host input with delivery times: (millisecond, byte).
///
/// The 'n' at 300 ms lands while the first index move is still running
/// and is dropped; 'x' is not a command and is ignored; the eleventh 'n'
/// finds the disk saturated at the last station.
const SCRIPT: &[(u64, u8)] = &[
    (0, b'n'),
    (300, b'n'),
    (1_500, b'x'),
    (3_000, b'n'),
    (4_500, b'n'),
    (6_000, b'n'),
    (7_500, b'n'),
    (9_000, b'n'),
    (10_500, b'n'),
    (12_000, b'n'),
    (13_500, b'n'),
    (15_000, b'n'),
    (16_500, b'p'),
    (40_000, b'h'),
];

/// Shared physical coordinate between a step device and its switch.
type Shared = Rc<Cell<i64>>;

struct SimDevice {
    physical: Shared,
    previous_position: i64,
}

impl StepDevice for SimDevice {
    type Error = Infallible;

    fn step(&mut self, ctx: &StepContext) -> Result<(), Self::Error> {
        let diff = ctx.position - self.previous_position;
        self.physical.set(self.physical.get() + diff.signum());
        self.previous_position = ctx.position;
        Ok(())
    }
}

struct SimSwitch {
    physical: Shared,
    mounted_at: i64,
}

impl ErrorType for SimSwitch {
    type Error = Infallible;
}

impl InputPin for SimSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.physical.get() > self.mounted_at)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.physical.get() <= self.mounted_at)
    }
}

fn build_axis(
    config: &carousel_motion::SystemConfig,
    name: &str,
    switch_offset: i64,
) -> Axis<SimDevice, SimSwitch> {
    let physical: Shared = Rc::new(Cell::new(0));
    Axis::builder()
        .device(SimDevice {
            physical: physical.clone(),
            previous_position: 0,
        })
        .switch(SimSwitch {
            physical,
            mounted_at: -switch_offset,
        })
        .from_config(config, name)
        .expect("axis exists")
        .build()
        .expect("axis builds")
}

fn main() {
    let config = parse_config(CONFIG).expect("config is valid");
    let sampler = config.sampler.clone().expect("sampler routing configured");

    let mut carousel = build_axis(&config, sampler.carousel.as_str(), 30);
    let mut plunger = build_axis(&config, sampler.plunger.as_str(), 50);

    let mut now = Duration::ZERO;

    println!("System start. Homing carousel disk and plunger...");
    carousel.begin_homing(now);
    plunger.begin_homing(now);

    // Wait out boot homing before starting the command clock, as the
    // serial port effectively does while the original sketches home.
    while carousel.status() != HomingStatus::Homed || plunger.status() != HomingStatus::Homed {
        tick(&mut carousel, now, "carousel");
        tick(&mut plunger, now, "plunger");
        now += Duration::from_millis(1);
    }
    println!("System ready.\n");

    let script_start = now;
    let mut script = SCRIPT.iter().peekable();
    let mut carousel_was_idle = true;
    let mut plunger_was_idle = true;
    let mut iterations = 0u64;

    loop {
        tick(&mut carousel, now, "carousel");
        tick(&mut plunger, now, "plunger");

        // Arrival reports on the idle transition.
        if !carousel_was_idle && carousel.is_idle() {
            println!(
                "  > carousel at station {} ({} steps)",
                carousel.station().unwrap_or(0),
                carousel.position().value()
            );
        }
        if !plunger_was_idle && plunger.is_idle() && plunger.status() == HomingStatus::Homed {
            println!("  > plunger at {} steps", plunger.position().value());
        }
        carousel_was_idle = carousel.is_idle();
        plunger_was_idle = plunger.is_idle();

        // At most one command byte per loop iteration.
        if let Some(&&(at_ms, byte)) = script.peek() {
            if now.saturating_sub(script_start) >= Duration::from_millis(at_ms) {
                script.next();
                dispatch(byte, &mut carousel, &mut plunger, &sampler, now);
            }
        } else if carousel.is_idle()
            && plunger.is_idle()
            && plunger.status() == HomingStatus::Homed
        {
            break;
        }

        now += Duration::from_millis(1);
        iterations += 1;
        if iterations > 10_000_000 {
            panic!("demo did not settle");
        }
    }

    println!(
        "\nCycle complete: station {}, plunger parked at {} steps.",
        carousel.station().unwrap_or(0),
        plunger.position().value()
    );
}

fn dispatch(
    byte: u8,
    carousel: &mut Axis<SimDevice, SimSwitch>,
    plunger: &mut Axis<SimDevice, SimSwitch>,
    sampler: &carousel_motion::SamplerConfig,
    now: Duration,
) {
    match Command::parse(byte) {
        Some(Command::NextStation) => match carousel.advance() {
            Ok(outcome) => println!("{}", outcome),
            Err(e) => println!("carousel: {}", e),
        },
        Some(Command::Press) => {
            println!("Pressing syringe ({} mm)...", sampler.press_depth.value());
            if let Err(e) = plunger.move_to_depth(sampler.press_depth) {
                println!("plunger: {}", e);
            }
        }
        Some(Command::Rehome) => {
            println!("Re-homing plunger...");
            plunger.begin_homing(now);
        }
        None => {} // not a command; ignored
    }
}

/// Tick an axis, printing homing transitions and failures.
fn tick(axis: &mut Axis<SimDevice, SimSwitch>, now: Duration, label: &str) {
    match axis.tick(now) {
        Ok(Some(HomingEvent::Contacted)) => {
            println!("  > {}: switch hit, backing off...", label);
        }
        Ok(Some(HomingEvent::Complete)) => {
            println!("  > {}: homing complete, at position 0.", label);
        }
        Ok(None) => {}
        Err(e) => println!("{}: {}", label, e),
    }
}
