pub mod debug_console;
pub mod help;
pub mod splash_screen;
pub mod table;
