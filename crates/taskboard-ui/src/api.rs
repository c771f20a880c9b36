use taskboard_core::{
  BackendConfig,
  HttpTaskApi
};

thread_local! {
  static CLIENT: HttpTaskApi = build_client();
}

/// The shared backend client. Cloning is cheap; the underlying
/// connection state is reference counted.
pub fn client() -> HttpTaskApi {
  CLIENT.with(Clone::clone)
}

fn build_client() -> HttpTaskApi {
  let configured =
    option_env!("TASKBOARD_BACKEND_URL")
      .map(str::to_string);

  let config =
    match BackendConfig::resolve([
      configured
    ]) {
      | Ok(config) => config,
      | Err(err) => {
        tracing::error!(
          error = %format!("{err:#}"),
          "invalid build-time backend url, using the default"
        );
        BackendConfig::default()
      }
    };

  tracing::info!(
    base_url = %config.base_url(),
    "configured task backend"
  );
  HttpTaskApi::new(&config)
}
