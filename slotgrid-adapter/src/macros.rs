// Crate-local tracing shims. Without the `tracing` feature they expand to nothing.

#[cfg(feature = "tracing")]
macro_rules! vlog {
    ($level:ident: $($tt:tt)*) => {
        tracing::$level!(target: "slotgrid_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vlog {
    ($level:ident: $($tt:tt)*) => {};
}

macro_rules! vtrace {
    ($($tt:tt)*) => {
        vlog!(trace: $($tt)*)
    };
}

macro_rules! vdebug {
    ($($tt:tt)*) => {
        vlog!(debug: $($tt)*)
    };
}
