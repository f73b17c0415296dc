//! Host-side wiring tests on the mock platform
//!
//! Run with `cargo test --features mock`.

use core::f32::consts::PI;

use pico_rover::core::{CancelToken, IrqRegistry};
use pico_rover::devices::distance::NO_READING;
use pico_rover::devices::{Button, DistanceSensor, EchoChannel, PwmActuator, QuadratureEncoder};
use pico_rover::libraries::{DirectionalMotor, DriveMode, DualMotor, Motor};
use pico_rover::parameters::{BoardPins, EncoderConfig, EncoderPins, PwmProfile};
use pico_rover::platform::mock::{MockAlarm, MockGpio, MockIrq, MockPwm, MockTimer};
use pico_rover::platform::traits::{EdgeMask, IrqController, TimerInterface};
use pico_rover::platform::{PlatformError, Result};

const ECHO: u8 = 8;
const ENC_A: u8 = 2;
const ENC_B: u8 = 3;

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

fn motor(pins: pico_rover::parameters::MotorPins) -> DirectionalMotor<MockPwm, MockGpio> {
    let pwm = PwmActuator::motor(MockPwm::new()).unwrap();
    DirectionalMotor::new(
        pwm,
        MockGpio::new_output(pins.in1),
        MockGpio::new_output(pins.in2),
    )
    .unwrap()
}

#[test]
fn test_default_board_is_valid() {
    let mut board = BoardPins::default();
    assert_eq!(board.validate(), Ok(()));

    board.left_encoder = Some(EncoderPins { a: ENC_A, b: ENC_B });
    assert_eq!(board.validate(), Ok(()));
}

#[test]
fn test_sonar_and_encoder_share_one_registry() {
    let echo = EchoChannel::new(MockGpio::new_input(ECHO), MockTimer::new()).unwrap();
    let encoder = QuadratureEncoder::new(
        MockGpio::new_input(ENC_A),
        MockGpio::new_input(ENC_B),
        EncoderConfig::default(),
    )
    .unwrap();
    let registry = IrqRegistry::new(MockIrq::new());
    let mut alarm = MockAlarm::new();

    let sonar = DistanceSensor::new(MockPwm::new(), &echo, &registry).unwrap();
    encoder.start(&registry, &mut alarm).unwrap();

    assert_eq!(registry.len(), 3);
    for pin in [ECHO, ENC_A, ENC_B] {
        assert_eq!(registry.controller().enabled(pin), EdgeMask::BOTH_EDGES);
    }
    assert_eq!(alarm.period_us(), Some(10_000));

    // No echo yet
    assert_eq!(sonar.distance(), NO_READING);

    // 1160 us round trip is 20 cm
    echo.pin().inner().drive(true);
    registry.dispatch(ECHO, EdgeMask::EDGE_RISE);
    echo.clock().advance(1160);
    echo.pin().inner().drive(false);
    registry.dispatch(ECHO, EdgeMask::EDGE_FALL);
    assert_close(sonar.distance(), 0.2);

    // One motor-shaft revolution, A leading B
    for _ in 0..7 {
        for (pin, high) in [(ENC_A, true), (ENC_B, true), (ENC_A, false), (ENC_B, false)] {
            let line = if pin == ENC_A {
                encoder.phase_a().inner()
            } else {
                encoder.phase_b().inner()
            };
            line.drive(high);
            let event = if high {
                EdgeMask::EDGE_RISE
            } else {
                EdgeMask::EDGE_FALL
            };
            registry.dispatch(pin, event);
        }
    }
    assert_eq!(encoder.count(), 28);

    // Sonar edges never reach the encoder
    assert_close(sonar.distance(), 0.2);

    assert!(alarm.fire());
    let wheel = 200.0 * PI / 98.5;
    assert_close(encoder.angular_velocity(), wheel);
    assert_close(encoder.linear_velocity(), wheel * 0.025);

    // No movement during the next period
    assert!(alarm.fire());
    assert_eq!(encoder.angular_velocity(), 0.0);

    encoder.stop(&registry, &mut alarm);
    let trigger = sonar.shutdown(&registry).unwrap();
    assert!(registry.is_empty());
    assert_eq!(registry.controller().enabled(ECHO), EdgeMask::empty());
    assert_eq!(trigger.config().map(|c| c.resolution()), Some(49_999));
    assert!(!alarm.fire());
}

#[test]
fn test_echo_pin_cannot_be_claimed_twice() {
    let echo = EchoChannel::new(MockGpio::new_input(ECHO), MockTimer::new()).unwrap();
    let registry = IrqRegistry::new(MockIrq::new());

    let _sonar = DistanceSensor::new(MockPwm::new(), &echo, &registry).unwrap();
    let second = DistanceSensor::new(MockPwm::new(), &echo, &registry);
    assert!(matches!(second, Err(PlatformError::Irq(_))));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_drivetrain_manoeuvres() {
    let board = BoardPins::default();
    let mut drive = DualMotor::new(
        motor(board.left_motor),
        motor(board.right_motor),
        MockGpio::new_output(board.standby),
    )
    .unwrap();
    assert!(!drive.is_enabled());

    drive.set_state(true).unwrap();
    drive.forward(0.5).unwrap();
    assert_eq!(drive.mode(), DriveMode::Forward);
    assert_eq!(drive.left().lines(), (false, true));
    assert_eq!(drive.right().lines(), (false, true));

    drive.spin_left(0.25).unwrap();
    assert_eq!(drive.left().lines(), (true, false));
    assert_eq!(drive.right().lines(), (false, true));
    assert_eq!(drive.left_duty(), 0.25);
    assert_eq!(drive.right_duty(), 0.25);

    // Rejected command leaves both sides untouched
    assert!(drive.backward(1.5).is_err());
    assert_eq!(drive.mode(), DriveMode::SpinLeft);
    assert_eq!(drive.left_duty(), 0.25);

    drive.stop().unwrap();
    assert_eq!(drive.left().duty(), 0.0);
    assert_eq!(drive.right().duty(), 0.0);
    assert!(drive.is_enabled());
}

/// Timer that raises a stop request once `after` delays have elapsed
struct InterruptingTimer<'t> {
    inner: MockTimer,
    token: &'t CancelToken,
    after: u32,
    delays: u32,
}

impl TimerInterface for InterruptingTimer<'_> {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.delays += 1;
        if self.delays == self.after {
            self.token.cancel();
        }
        self.inner.delay_us(us)
    }

    fn now_us(&self) -> u64 {
        self.inner.now_us()
    }
}

#[test]
fn test_button_interrupts_led_fade() {
    let mut led = PwmActuator::with_profile(MockPwm::new(), PwmProfile::LED).unwrap();
    let token = CancelToken::new();
    let mut timer = InterruptingTimer {
        inner: MockTimer::new(),
        token: &token,
        after: 40,
        delays: 0,
    };

    let outcome = led.fade_up(1000, 1.0, &token, &mut timer).unwrap();
    assert!(outcome.cancelled);
    assert_eq!(outcome.steps, 40);
    assert_close(led.duty(), 0.4);
    assert_eq!(timer.now_us(), 400_000);

    // A fresh ramp runs to completion with the same token
    let outcome = led.fade_down(100, 1.0, &token, &mut timer).unwrap();
    assert!(!outcome.cancelled);
    assert_eq!(outcome.steps, 100);
    assert_eq!(led.duty(), 0.0);
}

#[test]
fn test_button_reads_against_pull() {
    let button = Button::new(MockGpio::new_input(22), true).unwrap();
    assert!(!button.is_pressed());

    button.pin().inner().drive(false);
    assert!(button.is_pressed());
}
