use log::{info, warn};

use common::types::PermissionState;
use sensor_state_rs::{run_mock_service, SensorStateConfig, SimulationConfig};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SensorStateConfig::from_file(path).unwrap(),
        None => SensorStateConfig::default(),
    };

    // Start mock service, stopped with Ctrl+C
    let (handle, service) = run_mock_service(config, SimulationConfig::default(), None).unwrap();

    // Motion screen
    let _motion = service.motion_state().subscribe({
        let state = service.motion_state().clone();
        move |_| {
            let reading = state.get();
            info!(
                "X: {:.2}  Y: {:.2}  Z: {:.2}  Movement Strength: {:.2}",
                reading.x(),
                reading.y(),
                reading.z(),
                reading.magnitude()
            );
        }
    });

    // GPS screen
    let _gps = service.gps_state().subscribe({
        let state = service.gps_state().clone();
        move |_| {
            let reading = state.get();
            info!(
                "Latitude: {:.5}  Longitude: {:.5}  Accuracy: {:.1} m",
                reading.latitude, reading.longitude, reading.accuracy
            );
        }
    });
    let _permission = service.permission_state().subscribe({
        let state = service.permission_state().clone();
        move |_| {
            if state.get() == PermissionState::Denied {
                warn!("Location permission is required");
            }
        }
    });

    service.resume_motion_tracking();
    service.start_gps_tracking();

    handle.await.unwrap();
}
