use log::error;

fn main() {
    env_logger::init();

    if let Err(e) = ais_trajectory::get_arg().and_then(ais_trajectory::run) {
        error!("{e:#}");
        std::process::exit(-1);
    }
}
