// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Krone board firmware entry point.
//!
//! Brings up the clocks, the serial link, both H-bridges and the sensor sampler, then runs the
//! mode scheduler forever. Two interrupts feed it: USART1 turns received bytes into commands and
//! TIM6 refreshes the sensor snapshot.

#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(target_os = "none")]
mod app {
    use core::cell::{Cell, RefCell};

    use cortex_m::{
        asm,
        interrupt::{free, Mutex},
    };
    use cortex_m_rt::entry;
    use heapless::spsc::{Producer, Queue};
    use panic_halt as _;

    #[cfg(feature = "defmt")]
    use defmt_rtt as _;

    use stm32f7xx_hal::{
        pac::{self, interrupt, Interrupt, NVIC},
        prelude::*,
        serial::{Config, Serial},
    };

    use krone::config::{BAUD_RATE, COMMAND_MAILBOX_DEPTH, RX_QUEUE_CAPACITY};
    use krone::control::{modes, Board, Cpu, Scheduler};
    use krone::drivers::{HBridge, MotorId, MotorPair};
    use krone::hw::{
        pwm, usart, Adc, BoardPins, DirPin, PortBInputs, Pwm4Channel, SampleTick, UsartRx, UsartTx,
    };
    use krone::protocol::{Event, RxLink};
    use krone::sensors::{Sampler, SamplingSwitch, SensorSnapshot};

    type Bridge<const A: u8, const B: u8, const C: u8> =
        HBridge<DirPin<'D', A>, DirPin<'D', B>, Pwm4Channel<C>>;

    type Motors = MotorPair<Bridge<0, 1, 1>, Bridge<2, 3, 2>>;

    /// Everything the USART1 handler owns.
    struct RxContext {
        rx: UsartRx<pac::USART1>,
        link: RxLink<RX_QUEUE_CAPACITY>,
        mailbox: Producer<'static, Event, COMMAND_MAILBOX_DEPTH>,
    }

    static RX: Mutex<RefCell<Option<RxContext>>> = Mutex::new(RefCell::new(None));

    static SAMPLER: Mutex<RefCell<Option<Sampler<Adc<pac::ADC1>, PortBInputs>>>> =
        Mutex::new(RefCell::new(None));

    /// Newest snapshot not yet reported.
    static LATEST: Mutex<Cell<Option<SensorSnapshot>>> = Mutex::new(Cell::new(None));

    struct KroneBoard {
        tx: UsartTx<pac::USART1>,
        motors: Motors,
        sampling: SamplingSwitch<SampleTick>,
    }

    impl Board for KroneBoard {
        fn write(&mut self, bytes: &[u8]) {
            self.tx.write_bytes(bytes);
        }

        fn set_motor_speed(&mut self, motor: MotorId, speed: i32) {
            self.motors.set_speed(motor, speed);
        }

        fn set_sampling(&mut self, enabled: bool) {
            if enabled {
                self.sampling.enable();
            } else {
                self.sampling.disable();
                free(|cs| LATEST.borrow(cs).set(None));
            }
        }

        fn sampling_enabled(&self) -> bool {
            self.sampling.is_enabled()
        }

        fn snapshot_pending(&self) -> bool {
            free(|cs| LATEST.borrow(cs).get().is_some())
        }

        fn take_snapshot(&mut self) -> Option<SensorSnapshot> {
            free(|cs| LATEST.borrow(cs).take())
        }
    }

    struct CortexCpu;

    impl Cpu for CortexCpu {
        fn masked<R>(&mut self, f: impl FnOnce() -> R) -> R {
            free(|_| f())
        }

        fn sleep_unless(&mut self, pending: impl FnOnce() -> bool) {
            // WFI still wakes on an interrupt that became pending while masked.
            free(|_| {
                if !pending() {
                    asm::wfi();
                }
            });
        }
    }

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();
        let timclk = clocks.timclk1().raw();

        // GPIO
        let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);

        // USART1 (command link)
        let usart_cfg = Config {
            baud_rate: BAUD_RATE.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART1,
            (pins.usart1.tx, pins.usart1.rx),
            &clocks,
            usart_cfg,
        );
        let (tx, mut rx) = usart::split(serial);
        rx.listen();

        // H-bridges on TIM4 CH1/CH2
        let (pwm_left, pwm_right) = pwm::tim4(dp.TIM4, timclk);
        let left = HBridge::new(
            DirPin::new(pins.left.in_a),
            DirPin::new(pins.left.in_b),
            pwm_left,
        );
        let right = HBridge::new(
            DirPin::new(pins.right.in_a),
            DirPin::new(pins.right.in_b),
            pwm_right,
        );

        // Sensors
        let sampler = Sampler::new(Adc::adc1(dp.ADC1), PortBInputs::new(pins.inputs));
        let tick = SampleTick::tim6(dp.TIM6, timclk);

        let mut board = KroneBoard {
            tx,
            motors: MotorPair::new(left, right),
            sampling: SamplingSwitch::new(tick),
        };
        modes::brake_all(&mut board);

        // Command mailbox
        let queue: &'static mut Queue<Event, COMMAND_MAILBOX_DEPTH> =
            cortex_m::singleton!(: Queue<Event, COMMAND_MAILBOX_DEPTH> = Queue::new()).unwrap();
        let (producer, mut consumer) = queue.split();

        free(|cs| {
            SAMPLER.borrow(cs).replace(Some(sampler));
            RX.borrow(cs).replace(Some(RxContext {
                rx,
                link: RxLink::new(),
                mailbox: producer,
            }));
        });

        unsafe { NVIC::unmask(Interrupt::USART1) };

        let mut cpu = CortexCpu;
        let mut scheduler = Scheduler::new();
        loop {
            scheduler.step(&mut consumer, &mut cpu, &mut board);
        }
    }

    #[interrupt]
    fn USART1() {
        free(|cs| {
            let mut rx = RX.borrow(cs).borrow_mut();
            let Some(ctx) = rx.as_mut() else {
                return;
            };
            while let Some(byte) = ctx.rx.read() {
                ctx.link.receive(byte, &mut ctx.mailbox);
            }
        });
    }

    #[interrupt]
    fn TIM6_DAC() {
        SampleTick::clear_interrupt();
        free(|cs| {
            if let Some(sampler) = SAMPLER.borrow(cs).borrow_mut().as_mut() {
                LATEST.borrow(cs).set(Some(sampler.sample()));
            }
        });
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
