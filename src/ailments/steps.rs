//! Reusable treatment steps.

use crate::probe::{read_manifest, Manifest};

use super::ailment::TreatmentStep;
use super::deps::AilmentDeps;

/// Install everything the manifest declares with the project's package manager.
pub fn install_step(deps: &AilmentDeps) -> TreatmentStep {
    let deps = deps.clone();
    TreatmentStep::new("Install dependencies with the project's package manager", move |ctx| {
        let pm = deps.package_manager_for(ctx.dir());
        tracing::info!("Running {} install in {}", pm, ctx.dir().display());
        deps.runner.run(ctx.dir(), pm.program(), &pm.install_args())
    })
}

/// Edit `package.json` in place, then check the edit stuck.
///
/// The manifest is read fresh from disk so the step sees the effect of any
/// earlier step, and `edit` must leave an already-edited manifest unchanged.
pub fn manifest_step<E, V>(description: impl Into<String>, edit: E, verify: V) -> TreatmentStep
where
    E: Fn(&mut Manifest) + Send + Sync + 'static,
    V: Fn(&Manifest) -> bool + Send + Sync + 'static,
{
    TreatmentStep::new(description, move |ctx| {
        let mut manifest = read_manifest(ctx.dir())
            .ok_or_else(|| anyhow::anyhow!("No readable package.json in {}", ctx.dir().display()))?;
        edit(&mut manifest);
        manifest.write(ctx.dir())?;
        Ok(())
    })
    .with_verify(move |ctx| ctx.manifest().map(&verify).unwrap_or(false))
}
