mod behavior;
mod commands;
mod lifecycle;
mod stats;
mod steering;
