//! Binario de demo: ejecuta los pipelines de `opflow_rust::demo` con logging.
use log::{error, info};
use opflow_rust::config::CONFIG;
use opflow_rust::demo;

fn main() {
    env_logger::Builder::new().parse_filters(&CONFIG.log_level).init();
    info!("opflow demo (separator={:?}, repeat={})", CONFIG.demo.separator, CONFIG.demo.repeat);

    match demo::run_all(&CONFIG.demo) {
        Ok(results) => {
            for (name, output) in results {
                println!("{name}: {output}");
            }
        }
        Err(e) => {
            error!("demo failed: {e}");
            std::process::exit(1);
        }
    }
}
