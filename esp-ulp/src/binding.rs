//! # Host runtime binding
//!
//! ## Overview
//!
//! Scripting runtimes embedding this crate reach the ULP object by name with
//! dynamically typed arguments. This module implements that calling
//! convention on top of the typed [`Ulp`] API: it checks argument counts,
//! unwraps integers and read-only buffers, and reports anything that doesn't
//! fit as a [`UsageError`] before the driver is touched.
//!
//! The object exposed to the runtime is a type named [`TYPE_NAME`] with
//! these attributes:
//!
//! | Attribute | Arguments | Returns |
//! |---|---|---|
//! | `set_wakeup_period` | `period_index: int, period_us: int` | `None` |
//! | `load_binary` | `load_addr: int, program_binary: buffer` | `None` |
//! | `run` | `entry_point: int` | `None` |
//! | `init_gpio` | `gpio_num: int` | `None` |
//! | `RESERVE_MEM` | | `int` |
//!
//! Constructing the type takes no arguments and always yields the same
//! object (see [`make_new`]).

use crate::{Error, RESERVE_MEM, Ulp, UsageError, driver::UlpDriver};

/// Name of the ULP type as seen by the host runtime.
pub const TYPE_NAME: &str = "ULP";

/// A value crossing the host runtime boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value<'a> {
    /// The runtime's `None`.
    None,
    /// A boolean, usable where an integer is expected.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string, usable where a read-only buffer is expected.
    Str(&'a str),
    /// A bytes-like object.
    Bytes(&'a [u8]),
}

impl<'a> Value<'a> {
    /// Unwraps an integer.
    pub fn as_int(&self) -> Result<i64, UsageError> {
        match *self {
            Value::Int(value) => Ok(value),
            Value::Bool(value) => Ok(value as i64),
            _ => Err(UsageError::TypeMismatch { expected: "int" }),
        }
    }

    /// Unwraps a read-only buffer.
    pub fn as_buffer(&self) -> Result<&'a [u8], UsageError> {
        match *self {
            Value::Bytes(bytes) => Ok(bytes),
            Value::Str(s) => Ok(s.as_bytes()),
            _ => Err(UsageError::TypeMismatch { expected: "buffer" }),
        }
    }

    fn to<T: TryFrom<i64>>(self) -> Result<T, UsageError> {
        T::try_from(self.as_int()?).map_err(|_| UsageError::OutOfRange)
    }
}

/// A method of the ULP type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    /// [`Ulp::set_wakeup_period`]
    SetWakeupPeriod,
    /// [`Ulp::load_binary`]
    LoadBinary,
    /// [`Ulp::run`]
    Run,
    /// [`Ulp::init_gpio`]
    InitGpio,
}

impl Method {
    /// All methods, in attribute table order.
    pub const ALL: [Method; 4] = [
        Method::SetWakeupPeriod,
        Method::LoadBinary,
        Method::InitGpio,
        Method::Run,
    ];

    /// Attribute name of the method.
    pub const fn name(self) -> &'static str {
        match self {
            Method::SetWakeupPeriod => "set_wakeup_period",
            Method::LoadBinary => "load_binary",
            Method::Run => "run",
            Method::InitGpio => "init_gpio",
        }
    }

    /// Number of positional arguments, not counting the object itself.
    pub const fn arity(self) -> usize {
        match self {
            Method::SetWakeupPeriod | Method::LoadBinary => 2,
            Method::Run | Method::InitGpio => 1,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }
}

/// Result of an attribute lookup on the ULP object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attr {
    /// A bound method, to be invoked through [`Ulp::call`].
    Method(Method),
    /// An integer constant.
    Int(i64),
}

/// Checks the argument counts of a callee taking exactly `expected`
/// positional and no keyword arguments.
pub fn check_args(
    args: &[Value<'_>],
    kwargs: &[(&str, Value<'_>)],
    expected: usize,
) -> Result<(), UsageError> {
    if !kwargs.is_empty() {
        return Err(UsageError::UnexpectedKeyword);
    }
    if args.len() != expected {
        return Err(UsageError::ArgumentCount {
            expected,
            given: args.len(),
        });
    }

    Ok(())
}

/// Constructor of the ULP type: takes no arguments and returns the
/// singleton.
pub fn make_new<D: UlpDriver>(
    args: &[Value<'_>],
    kwargs: &[(&str, Value<'_>)],
) -> Result<&'static Ulp<D>, UsageError> {
    check_args(args, kwargs, 0)
        .inspect_err(|err| warn!("Rejected {} construction: {}", TYPE_NAME, err))?;

    Ok(Ulp::get())
}

impl<D: UlpDriver> Ulp<D> {
    /// Looks up an attribute of the ULP object.
    pub fn attr(&self, name: &str) -> Result<Attr, UsageError> {
        if name == "RESERVE_MEM" {
            return Ok(Attr::Int(RESERVE_MEM as i64));
        }

        Method::from_name(name)
            .map(Attr::Method)
            .ok_or(UsageError::UnknownAttribute)
    }

    /// Calls the method `name` with dynamically typed arguments.
    ///
    /// Usage errors are reported before the driver is called; driver
    /// failures are returned as [`Error::Driver`].
    pub fn call(
        &self,
        name: &str,
        args: &[Value<'_>],
        kwargs: &[(&str, Value<'_>)],
    ) -> Result<Value<'static>, Error> {
        let Attr::Method(method) = self.attr(name)? else {
            return Err(UsageError::UnknownAttribute.into());
        };
        check_args(args, kwargs, method.arity())?;

        match method {
            Method::SetWakeupPeriod => {
                self.set_wakeup_period(args[0].to()?, args[1].to()?)?;
            }
            Method::LoadBinary => {
                let load_addr = args[0].to()?;
                self.load_binary(load_addr, args[1].as_buffer()?)?;
            }
            Method::Run => self.run(args[0].to()?)?,
            Method::InitGpio => self.init_gpio(args[0].to()?),
        }

        Ok(Value::None)
    }
}

#[cfg(test)]
mod tests {
    use std::vec;

    use super::*;
    use crate::mock::{Call, Recorder};

    fn ulp() -> &'static Ulp<Recorder> {
        let ulp = make_new::<Recorder>(&[], &[]).unwrap();
        Recorder::reset();
        ulp
    }

    #[test]
    fn construction_rejects_arguments() {
        assert_eq!(
            make_new::<Recorder>(&[Value::Int(0)], &[]).err(),
            Some(UsageError::ArgumentCount {
                expected: 0,
                given: 1
            })
        );
        assert_eq!(
            make_new::<Recorder>(&[Value::None, Value::None], &[]).err(),
            Some(UsageError::ArgumentCount {
                expected: 0,
                given: 2
            })
        );
        assert_eq!(
            make_new::<Recorder>(&[], &[("period", Value::Int(1))]).err(),
            Some(UsageError::UnexpectedKeyword)
        );
    }

    #[test]
    fn construction_returns_singleton() {
        let first = make_new::<Recorder>(&[], &[]).unwrap();
        let second = make_new::<Recorder>(&[], &[]).unwrap();

        assert!(core::ptr::eq(first, second));
        assert!(core::ptr::eq(first, Ulp::<Recorder>::get()));
    }

    #[test]
    fn rejected_construction_has_no_side_effect() {
        Recorder::reset();

        make_new::<Recorder>(&[Value::Int(1)], &[]).unwrap_err();
        assert_eq!(Recorder::calls(), vec![]);
    }

    #[test]
    fn reserve_mem_attribute() {
        assert_eq!(ulp().attr("RESERVE_MEM"), Ok(Attr::Int(RESERVE_MEM as i64)));
    }

    #[test]
    fn method_attributes() {
        let ulp = ulp();

        for method in Method::ALL {
            assert_eq!(ulp.attr(method.name()), Ok(Attr::Method(method)));
        }
        assert_eq!(ulp.attr("stop"), Err(UsageError::UnknownAttribute));
        assert_eq!(
            ulp.call("RESERVE_MEM", &[], &[]),
            Err(Error::Usage(UsageError::UnknownAttribute))
        );
    }

    #[test]
    fn calls_reach_the_driver() {
        let ulp = ulp();
        let program = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];

        assert_eq!(
            ulp.call(
                "set_wakeup_period",
                &[Value::Int(0), Value::Int(100_000)],
                &[]
            ),
            Ok(Value::None)
        );
        assert_eq!(
            ulp.call("load_binary", &[Value::Int(0), Value::Bytes(&program)], &[]),
            Ok(Value::None)
        );
        assert_eq!(ulp.call("run", &[Value::Int(12)], &[]), Ok(Value::None));
        assert_eq!(ulp.call("init_gpio", &[Value::Int(32)], &[]), Ok(Value::None));

        let calls = Recorder::calls();
        assert_eq!(
            calls[..3],
            [
                Call::SetWakeupPeriod {
                    period_index: 0,
                    period_us: 100_000
                },
                Call::LoadBinary {
                    load_addr: 0,
                    len: 7,
                    word_count: 1
                },
                Call::Run { entry_point: 3 },
            ]
        );
        assert_eq!(calls[3], Call::RtcGpioInit(32));
        assert_eq!(calls.len(), 9);
    }

    #[test]
    fn wrong_argument_count() {
        let ulp = ulp();

        assert_eq!(
            ulp.call("run", &[], &[]),
            Err(Error::Usage(UsageError::ArgumentCount {
                expected: 1,
                given: 0
            }))
        );
        assert_eq!(
            ulp.call("set_wakeup_period", &[Value::Int(0)], &[]),
            Err(Error::Usage(UsageError::ArgumentCount {
                expected: 2,
                given: 1
            }))
        );
        assert_eq!(
            ulp.call("init_gpio", &[Value::Int(4)], &[("pull", Value::Bool(true))]),
            Err(Error::Usage(UsageError::UnexpectedKeyword))
        );
        assert_eq!(Recorder::calls(), vec![]);
    }

    #[test]
    fn argument_conversion() {
        let ulp = ulp();

        assert_eq!(
            ulp.call("run", &[Value::Str("8")], &[]),
            Err(Error::Usage(UsageError::TypeMismatch { expected: "int" }))
        );
        assert_eq!(
            ulp.call("load_binary", &[Value::Int(0), Value::Int(0)], &[]),
            Err(Error::Usage(UsageError::TypeMismatch { expected: "buffer" }))
        );
        assert_eq!(
            ulp.call("run", &[Value::Int(-4)], &[]),
            Err(Error::Usage(UsageError::OutOfRange))
        );
        assert_eq!(
            ulp.call("set_wakeup_period", &[Value::Int(0), Value::Int(1 << 32)], &[]),
            Err(Error::Usage(UsageError::OutOfRange))
        );
        assert_eq!(
            ulp.call("init_gpio", &[Value::Int(1 << 40)], &[]),
            Err(Error::Usage(UsageError::OutOfRange))
        );
        assert_eq!(
            ulp.call("init_gpio", &[Value::Int(i64::from(i32::MIN) - 1)], &[]),
            Err(Error::Usage(UsageError::OutOfRange))
        );
        assert_eq!(Recorder::calls(), vec![]);

        // Booleans pass as integers and strings as buffers.
        ulp.call("run", &[Value::Bool(true)], &[]).unwrap();
        ulp.call("load_binary", &[Value::Int(4), Value::Str("abcdefgh")], &[])
            .unwrap();
        assert_eq!(
            Recorder::calls(),
            vec![
                Call::Run { entry_point: 0 },
                Call::LoadBinary {
                    load_addr: 4,
                    len: 8,
                    word_count: 2
                },
            ]
        );
    }

    #[test]
    fn driver_errors_carry_the_status() {
        let ulp = ulp();
        Recorder::respond_with(0x103);

        let calls: [(&str, &[Value<'_>]); 3] = [
            ("set_wakeup_period", &[Value::Int(1), Value::Int(500)]),
            ("load_binary", &[Value::Int(0), Value::Bytes(&[0; 8])]),
            ("run", &[Value::Int(8)]),
        ];
        for (name, args) in calls {
            let err = ulp.call(name, args, &[]).unwrap_err();
            let Error::Driver(err) = err else {
                panic!("expected a driver error from {name}, got {err:?}");
            };
            assert_eq!(err.code(), 0x103);
        }
        assert_eq!(Recorder::calls().len(), 3);

        // `init_gpio` has no failure path.
        assert_eq!(ulp.call("init_gpio", &[Value::Int(4)], &[]), Ok(Value::None));
    }
}
