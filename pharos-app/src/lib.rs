//! Example application: board buttons drive the display counter
//!
//! Pure glue over the driver clients, showing their consumption pattern:
//! subscribe to the button driver, enable interrupts on every button the
//! board reports, then loop forever forwarding presses to
//! [`DotsDisplay::counter_digit`]. Releases are ignored.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

use pharos_abi::ErrorCode;
use pharos_drivers::{ButtonEvents, Buttons, DotsDisplay, DotsError};
use pharos_syscall::{CompletionFlag, Kernel};

pub struct CounterApp<'k, K: Kernel> {
    kernel: &'k K,
    display: DotsDisplay<'k, K>,
    events: &'static ButtonEvents,
}

impl<'k, K: Kernel> CounterApp<'k, K> {
    /// Wire up the button driver.
    ///
    /// Fails with the error code of the first setup call the kernel
    /// rejects, leaving any interrupts that were already enabled as they
    /// are. `events` and `done` must live in static storage; the kernel
    /// holds references to them.
    pub fn new(
        kernel: &'k K,
        events: &'static ButtonEvents,
        done: &'static CompletionFlag,
    ) -> Result<Self, ErrorCode> {
        let buttons = Buttons::new(kernel);
        buttons.subscribe(events)?;

        let count = buttons.count()?;
        for button in 0..count {
            buttons.enable_interrupt(button)?;
        }

        Ok(CounterApp {
            kernel,
            display: DotsDisplay::new(kernel, done),
            events,
        })
    }

    /// Block until one button transition arrives and handle it. Presses
    /// update the displayed counter digit; releases do nothing.
    pub fn dispatch_next(&self) -> Result<(), DotsError> {
        let event = loop {
            // Arm before checking, so a transition queued between the
            // check and the wait still wakes us.
            self.events.ready().reset();
            if let Some(event) = self.events.take() {
                break event;
            }
            let _ = self.kernel.yield_wait(self.events.ready(), None);
        };

        if event.pressed {
            self.display.counter_digit(event.button)?;
        }
        Ok(())
    }

    /// Dispatch button transitions forever.
    pub fn run(&self) -> ! {
        loop {
            // Per-press display failures are not fatal to the loop.
            let _ = self.dispatch_next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pharos_abi::{buttons, dots, DriverId};
    use pharos_syscall::fake::{FakeKernel, SyscallEvent};
    use pharos_syscall::UpcallArgs;

    fn leaked_statics() -> (&'static ButtonEvents, &'static CompletionFlag) {
        (
            Box::leak(Box::new(ButtonEvents::new())),
            Box::leak(Box::new(CompletionFlag::new())),
        )
    }

    fn press(button: usize) -> UpcallArgs {
        UpcallArgs {
            arg0: button,
            arg1: buttons::PRESSED,
            arg2: 0,
        }
    }

    fn counter_commands(kernel: &FakeKernel) -> Vec<(usize, usize)> {
        kernel
            .events()
            .iter()
            .filter_map(|event| match event {
                SyscallEvent::Command {
                    driver,
                    command_num,
                    arg1,
                    ..
                } if *driver == DriverId::DOTS
                    && *command_num == dots::Command::CounterDigit.number() =>
                {
                    Some((*command_num, *arg1))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_setup_subscribes_and_enables_every_button() {
        let kernel = FakeKernel::new();
        kernel.queue_command_result(Ok(2)); // button count
        let (events, done) = leaked_statics();

        assert!(CounterApp::new(&kernel, events, done).is_ok());

        assert_eq!(
            kernel.events(),
            vec![
                SyscallEvent::Subscribe {
                    driver: DriverId::BUTTONS,
                    slot: buttons::SUBSCRIBE_PRESS,
                    registered: true,
                },
                SyscallEvent::Command {
                    driver: DriverId::BUTTONS,
                    command_num: 0,
                    arg1: 0,
                    arg2: 0,
                },
                SyscallEvent::Command {
                    driver: DriverId::BUTTONS,
                    command_num: 1,
                    arg1: 0,
                    arg2: 0,
                },
                SyscallEvent::Command {
                    driver: DriverId::BUTTONS,
                    command_num: 1,
                    arg1: 1,
                    arg2: 0,
                },
            ]
        );
    }

    #[test]
    fn test_setup_propagates_first_failing_call() {
        let kernel = FakeKernel::new();
        kernel.fail_next_subscribe(ErrorCode::NoDevice);
        let (events, done) = leaked_statics();

        assert_eq!(
            CounterApp::new(&kernel, events, done).err(),
            Some(ErrorCode::NoDevice)
        );
        // Setup stopped at the first rejection.
        assert_eq!(kernel.events().len(), 1);
    }

    #[test]
    fn test_two_presses_issue_two_independent_commands() {
        let kernel = FakeKernel::new();
        kernel.queue_command_result(Ok(2));
        let (events, done) = leaked_statics();
        let app = CounterApp::new(&kernel, events, done).unwrap();

        kernel.upcall_during_yield(DriverId::BUTTONS, buttons::SUBSCRIBE_PRESS, press(0));
        app.dispatch_next().unwrap();
        kernel.upcall_during_yield(DriverId::BUTTONS, buttons::SUBSCRIBE_PRESS, press(0));
        app.dispatch_next().unwrap();

        assert_eq!(counter_commands(&kernel), vec![(2, 0), (2, 0)]);
    }

    #[test]
    fn test_release_is_ignored() {
        let kernel = FakeKernel::new();
        kernel.queue_command_result(Ok(1));
        let (events, done) = leaked_statics();
        let app = CounterApp::new(&kernel, events, done).unwrap();

        kernel.upcall_during_yield(
            DriverId::BUTTONS,
            buttons::SUBSCRIBE_PRESS,
            UpcallArgs {
                arg0: 0,
                arg1: buttons::RELEASED,
                arg2: 0,
            },
        );
        app.dispatch_next().unwrap();

        assert!(counter_commands(&kernel).is_empty());
    }

    #[test]
    fn test_presses_queued_while_busy_are_not_lost() {
        let kernel = FakeKernel::new();
        kernel.queue_command_result(Ok(2));
        let (events, done) = leaked_statics();
        let app = CounterApp::new(&kernel, events, done).unwrap();

        // Both transitions are queued before the first wait; the second
        // press is delivered on the following wait and handled then.
        kernel.upcall_during_yield(DriverId::BUTTONS, buttons::SUBSCRIBE_PRESS, press(0));
        kernel.upcall_during_yield(DriverId::BUTTONS, buttons::SUBSCRIBE_PRESS, press(1));
        app.dispatch_next().unwrap();
        app.dispatch_next().unwrap();

        assert_eq!(counter_commands(&kernel), vec![(2, 0), (2, 1)]);
    }
}
