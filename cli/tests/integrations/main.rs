mod check;
mod eval;
mod puzzle;
mod server;
