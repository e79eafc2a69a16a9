macro_rules! owriteln {
    ($($arg:tt)*) => {{
        use std::io::{Write, stdout};
        let mut lock = stdout().lock();
        writeln!(lock, $($arg)*)
    }};
}

pub(crate) use owriteln;

macro_rules! suggest {
    () => {
        eprintln!()
    };
    ($($arg:tt)*) => {
        eprint!("{}", ::crossterm::style::Stylize::blue("HINT "));
        eprintln!($($arg)*);
    };
}

pub(crate) use suggest;
