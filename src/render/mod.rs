/// Chart rendering: plotting onto an RGB buffer and PNG encoding.
pub mod chart;
pub mod text;
