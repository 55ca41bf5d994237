use std::time::Duration;

use super::error::ProbeFailure;
use super::source::HostSource;
use super::units::clamp_percent;

/// Width of the CPU sampling window. Collection blocks for this long.
pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// The two independent readings taken over one sampling window.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuProbe {
    pub per_thread: Result<Vec<f64>, ProbeFailure>,
    pub average: Result<f64, ProbeFailure>,
}

/// Brackets `interval` with two counter reads, then reads per-processor and
/// aggregate utilization for that window.
///
/// An aggregate read that succeeds without data yields 0 and a warning, not
/// a failure. If the window cannot be opened both readings fail with the
/// same cause.
pub fn probe<H: HostSource + ?Sized>(host: &mut H, interval: Duration) -> CpuProbe {
    let _span = tracing::debug_span!("cpu.probe", interval_ms = interval.as_millis() as u64)
        .entered();

    let window = host.refresh_cpu().and_then(|()| {
        host.wait(interval);
        host.refresh_cpu()
    });
    if let Err(cause) = window {
        let failure = ProbeFailure::cpu(cause);
        return CpuProbe {
            per_thread: Err(failure.clone()),
            average: Err(failure),
        };
    }

    let per_thread = host
        .per_processor_usage()
        .map(|usage| {
            let usage: Vec<f64> = usage.into_iter().map(clamp_percent).collect();
            for (index, value) in usage.iter().enumerate() {
                tracing::debug!(core = index, usage = %format!("{value:.2}"), "cpu core usage");
            }
            usage
        })
        .map_err(ProbeFailure::cpu);

    let average = match host.aggregate_usage() {
        Ok(Some(value)) => Ok(clamp_percent(value)),
        Ok(None) => {
            tracing::warn!("aggregate cpu usage returned no data, reporting 0");
            Ok(0.0)
        }
        Err(cause) => Err(ProbeFailure::cpu(cause)),
    };

    CpuProbe {
        per_thread,
        average,
    }
}
