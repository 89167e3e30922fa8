#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod stats;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{BracketConfig, Config, MarkerConfig, load_config};
pub use ir::{AxisFrame, BracketSpec, EndpointRef, Observation};
pub use layout::{
    BracketLayout, CategoricalAxis, LayoutError, PositionedBracket, center_x,
    compute_bracket_layout, lay_out_instructions, plan_brackets,
};
pub use parser::{Instructions, parse_bracket_list, parse_instructions};
