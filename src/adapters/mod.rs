//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements   | Connects to                          |
//! |---------------|--------------|--------------------------------------|
//! | `hardware`    | InputPort    | IR receiver, card reader, PIR, mic   |
//! | `log_display` | DisplayPort  | Console stand-in for the TFT panel   |
//! | `log_sink`    | EventSink    | Serial / stdout log output           |
//! | `script`      | InputPort    | Scenario script replay               |
//! |               | ClockPort    | Script-driven tick                   |
//! | `time`        | ClockPort    | Host monotonic + wall clock          |

pub mod hardware;
pub mod log_display;
pub mod log_sink;
pub mod script;
pub mod time;
