/*
 * Copyright (c) 2022 Shi Lei
 *
 * Use of this source code is governed by a MIT-style license
 * that can be found in the LICENSE file or
 * at https://opensource.org/licenses/MIT
 */

//! Diagnostics for the sanity checker only. The allocate/free/reallocate
//! path never logs or does I/O, so this macro (and the `std` it pulls
//! in, declared at the crate root) is reachable only from `check()`,
//! which is itself compiled for tests and the `check` feature.

#[macro_export]
#[cfg(any(test, feature = "check"))]
macro_rules! dprintf {
    ($($arg:tt)*) => {
        std::eprintln!($($arg)*)
    };
}
