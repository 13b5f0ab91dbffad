pub mod chart;
pub mod configs;
pub mod experiment;
pub mod run;
pub mod session;
pub mod table;
