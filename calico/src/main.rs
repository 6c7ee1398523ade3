mod application;
mod config;
mod logging;

mod presentation {
    pub mod cli;
}

fn main() -> calico_core::error::Result<()> {
    application::run()
}
