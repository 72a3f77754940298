//! Sumo Match
//!
//! This example drives a simulated sumo robot through one short match.
//!
//! Key concepts:
//! - Nested states sharing a container's event handling
//! - Initial transitions selecting default substates
//! - Timer and encoder watches turned into events
//! - Scripted hardware standing in for real sensors
//!
//! Run with: cargo run --example sumo_match

use zumo_hsm::robot::{
    machine_builder, DetectDirection, Driver, Robot, RobotConfig, RobotEvent, SimulatedHardware,
};
use zumo_hsm::{Response, State, StateId, Transition};

type Bot = Robot<SimulatedHardware>;

const COUNTDOWN_MS: u64 = 5000;
const REVERSE_MS: u64 = 300;
const SEARCH_SPEED: i16 = 200;
const ATTACK_SPEED: i16 = 400;

/// Root: starts idle.
struct Sumo {
    waiting: StateId,
}

impl State<RobotEvent, Bot> for Sumo {
    fn on_initialize(&mut self, _: &mut Bot) -> Option<Transition> {
        Some(Transition::To(self.waiting))
    }
}

/// Motors off until the start button is pressed.
struct Waiting {
    fight: StateId,
}

impl State<RobotEvent, Bot> for Waiting {
    fn on_entry(&mut self, robot: &mut Bot) {
        robot.stop();
    }

    fn on_event(&mut self, event: &RobotEvent, _: &mut Bot) -> Response {
        match event {
            RobotEvent::Start => Transition::To(self.fight).into(),
            _ => Response::Unhandled,
        }
    }
}

/// The match itself: the start button aborts, the ring edge forces an escape.
struct Fight {
    countdown: StateId,
    waiting: StateId,
    escape: StateId,
}

impl State<RobotEvent, Bot> for Fight {
    fn on_exit(&mut self, robot: &mut Bot) {
        robot.cancel_timer();
        robot.cancel_encoder();
        robot.stop();
    }

    fn on_initialize(&mut self, _: &mut Bot) -> Option<Transition> {
        Some(Transition::To(self.countdown))
    }

    fn on_event(&mut self, event: &RobotEvent, _: &mut Bot) -> Response {
        match event {
            RobotEvent::Start => Transition::To(self.waiting).into(),
            RobotEvent::Boundary { .. } => Transition::To(self.escape).into(),
            _ => Response::Unhandled,
        }
    }
}

/// Mandatory wait before moving.
struct Countdown {
    search: StateId,
}

impl State<RobotEvent, Bot> for Countdown {
    fn on_entry(&mut self, robot: &mut Bot) {
        robot.start_timer(COUNTDOWN_MS);
    }

    fn on_event(&mut self, event: &RobotEvent, _: &mut Bot) -> Response {
        match event {
            RobotEvent::Timer => Transition::To(self.search).into(),
            // Not moving yet, so the ring edge is irrelevant.
            RobotEvent::Boundary { .. } => Response::Handled,
            _ => Response::Unhandled,
        }
    }
}

/// Spin in place until the opponent shows up.
struct Search {
    attack: StateId,
}

impl State<RobotEvent, Bot> for Search {
    fn on_entry(&mut self, robot: &mut Bot) {
        robot.move_wheels(SEARCH_SPEED, -SEARCH_SPEED);
    }

    fn on_event(&mut self, event: &RobotEvent, _: &mut Bot) -> Response {
        match event {
            RobotEvent::Proximity { direction, .. } if *direction != DetectDirection::None => {
                Transition::To(self.attack).into()
            }
            _ => Response::Unhandled,
        }
    }
}

/// Charge, steering toward the brighter proximity reading.
struct Attack {
    search: StateId,
}

impl State<RobotEvent, Bot> for Attack {
    fn on_entry(&mut self, robot: &mut Bot) {
        robot.move_forward(ATTACK_SPEED);
    }

    fn on_event(&mut self, event: &RobotEvent, robot: &mut Bot) -> Response {
        let RobotEvent::Proximity { direction, .. } = event else {
            return Response::Unhandled;
        };
        match direction {
            DetectDirection::None => return Transition::To(self.search).into(),
            DetectDirection::Left => robot.move_wheels(ATTACK_SPEED * 3 / 4, ATTACK_SPEED),
            DetectDirection::Right => robot.move_wheels(ATTACK_SPEED, ATTACK_SPEED * 3 / 4),
            DetectDirection::Ahead => robot.move_forward(ATTACK_SPEED),
        }
        Response::Handled
    }
}

/// Back away from the edge, then turn around.
struct Escape {
    reverse: StateId,
}

impl State<RobotEvent, Bot> for Escape {
    fn on_initialize(&mut self, _: &mut Bot) -> Option<Transition> {
        Some(Transition::To(self.reverse))
    }

    fn on_event(&mut self, event: &RobotEvent, _: &mut Bot) -> Response {
        match event {
            // Already escaping.
            RobotEvent::Boundary { .. } => Response::Handled,
            _ => Response::Unhandled,
        }
    }
}

struct Reverse {
    turn: StateId,
}

impl State<RobotEvent, Bot> for Reverse {
    fn on_entry(&mut self, robot: &mut Bot) {
        robot.move_forward(-SEARCH_SPEED);
        robot.start_timer(REVERSE_MS);
    }

    fn on_event(&mut self, event: &RobotEvent, _: &mut Bot) -> Response {
        match event {
            RobotEvent::Timer => Transition::To(self.turn).into(),
            _ => Response::Unhandled,
        }
    }
}

struct Turn {
    search: StateId,
}

impl State<RobotEvent, Bot> for Turn {
    fn on_entry(&mut self, robot: &mut Bot) {
        robot.spin_right(135, SEARCH_SPEED);
    }

    fn on_event(&mut self, event: &RobotEvent, _: &mut Bot) -> Response {
        match event {
            RobotEvent::Encoder => Transition::To(self.search).into(),
            _ => Response::Unhandled,
        }
    }
}

fn report(step: &str, driver: &Driver<SimulatedHardware>) {
    let (left, right) = driver.robot().speeds();
    println!(
        "  {:<28} state: {:<10} motors: ({:>4}, {:>4})",
        step,
        driver.machine().active_state_name(),
        left,
        right
    );
}

fn main() {
    println!("=== Sumo Match ===\n");

    let config = RobotConfig::default();
    let mut builder = machine_builder::<SimulatedHardware>(&config);
    let sumo = builder.root("Sumo");
    let waiting = builder.substate("Waiting", sumo);
    let fight = builder.substate("Fight", sumo);
    let countdown = builder.substate("Countdown", fight);
    let search = builder.substate("Search", fight);
    let attack = builder.substate("Attack", fight);
    let escape = builder.substate("Escape", fight);
    let reverse = builder.substate("Reverse", escape);
    let turn = builder.substate("Turn", escape);

    builder
        .behavior(sumo, Sumo { waiting })
        .behavior(waiting, Waiting { fight })
        .behavior(
            fight,
            Fight {
                countdown,
                waiting,
                escape,
            },
        )
        .behavior(countdown, Countdown { search })
        .behavior(search, Search { attack })
        .behavior(attack, Attack { search })
        .behavior(escape, Escape { reverse })
        .behavior(reverse, Reverse { turn })
        .behavior(turn, Turn { search });

    let machine = builder.build().unwrap();
    println!("State tree built with {} states\n", machine.len());

    let robot = Robot::new(SimulatedHardware::on_ring(), config);
    let mut driver = Driver::new(machine, robot).unwrap();

    println!("Match script:");
    driver.start();
    report("power on", &driver);

    driver.robot_mut().hardware_mut().press_start();
    driver.tick();
    report("start pressed", &driver);

    driver.robot_mut().hardware_mut().advance(COUNTDOWN_MS);
    driver.tick();
    report("countdown elapsed", &driver);

    driver.robot_mut().hardware_mut().proximity = (3, 5);
    driver.tick();
    report("opponent spotted right", &driver);

    driver.robot_mut().hardware_mut().proximity = (6, 2);
    driver.tick();
    report("opponent drifts left", &driver);

    driver.robot_mut().hardware_mut().line = [100, 1000, 1000];
    driver.tick();
    report("ring edge on the left", &driver);

    let hardware = driver.robot_mut().hardware_mut();
    hardware.line = [1000, 1000, 1000];
    hardware.proximity = (0, 0);
    hardware.advance(REVERSE_MS);
    driver.tick();
    report("backed off the edge", &driver);

    driver.robot_mut().hardware_mut().left_encoder = 600;
    driver.tick();
    report("turned around", &driver);

    driver.robot_mut().hardware_mut().press_start();
    driver.tick();
    report("start pressed again", &driver);

    println!("\nTransition path:");
    println!("  {}", driver.machine().log().path().join(" -> "));

    println!("\nDisplay history:");
    for text in &driver.robot().hardware().shown {
        println!("  {}", text);
    }

    println!("\nKey Characteristics:");
    println!("- Fight handles the start button and ring edge for every substate");
    println!("- Escape and Fight pick their default substates on entry");
    println!("- Leaving Fight always stops the motors and disarms the watches");

    println!("\n=== Example Complete ===");
}
