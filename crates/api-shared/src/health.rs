use crate::wire::HealthRes;
use stroke_core::InferenceContext;

/// Health reporting shared by every API surface.
///
/// The process is considered alive whenever it can answer; whether assessments can be scored
/// is reported separately through `artifacts_loaded`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new `HealthService` instance.
    pub fn new() -> Self {
        Self
    }

    /// Health of a running service backed by `ctx`.
    pub fn check_health(ctx: &InferenceContext) -> HealthRes {
        match ctx.unavailable_reason() {
            None => HealthRes {
                ok: true,
                message: "Stroke risk service is alive".into(),
                artifacts_loaded: true,
            },
            Some(reason) => HealthRes {
                ok: true,
                message: format!("Model artifacts unavailable: {reason}"),
                artifacts_loaded: false,
            },
        }
    }

    /// Instance form of [`HealthService::check_health`], for callers holding a service value.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The inference context whose artifact state is reported.
    ///
    /// # Returns
    ///
    /// A `HealthRes` that always has `ok` set; `artifacts_loaded` mirrors `ctx.is_ready()`.
    pub fn check_health_instance(&self, ctx: &InferenceContext) -> HealthRes {
        Self::check_health(ctx)
    }
}
