use std::cmp::Ordering;
use std::env;

/// Environment variable that forces the portable backend regardless of target.
const FORCE_FALLBACK_VAR: &str = "TILEGEMM_FORCE_FALLBACK";

// SIMD backends the kernels can be compiled against
#[derive(PartialEq, Eq, Debug)]
struct SimdBackend {
    name: &'static str,
    target_arch: &'static [&'static str],
    target_feature: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl SimdBackend {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "neon" => 0,
            "sse2" => 1,
            _ => usize::MAX,
        }
    }

    // Every backend here is 128 bits wide (4 x f32), matching the 4x4 tile
    fn backends() -> Vec<SimdBackend> {
        vec![
            SimdBackend {
                name: "sse2",
                target_arch: &["x86", "x86_64"],
                target_feature: "sse2",
                cfg_flag: "sse",
                detected: false,
            },
            SimdBackend {
                name: "neon",
                target_arch: &["aarch64"],
                target_feature: "neon",
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }
}

impl Ord for SimdBackend {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for SimdBackend {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Backend detection works on the *target* description cargo hands us, so
// cross builds pick the right intrinsics without probing the host CPU.
trait BackendDetector {
    fn detect(&self, backends: &mut [SimdBackend]);
}

struct TargetDetector {
    arch: String,
    features: Vec<String>,
}

impl TargetDetector {
    fn from_env() -> Self {
        let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
        let features = env::var("CARGO_CFG_TARGET_FEATURE")
            .unwrap_or_default()
            .split(',')
            .map(str::to_string)
            .collect();

        TargetDetector { arch, features }
    }
}

impl BackendDetector for TargetDetector {
    fn detect(&self, backends: &mut [SimdBackend]) {
        for backend in backends.iter_mut() {
            backend.detected = backend.target_arch.contains(&self.arch.as_str())
                && self.features.iter().any(|f| f == backend.target_feature);
        }
    }
}

fn forced_fallback() -> bool {
    matches!(
        env::var(FORCE_FALLBACK_VAR).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn apply(backends: &mut [SimdBackend]) {
    backends.sort();

    let cfg_flag = if forced_fallback() {
        "fallback"
    } else {
        backends
            .iter()
            .find(|backend| backend.detected)
            .map(|backend| backend.cfg_flag)
            .unwrap_or("fallback")
    };

    println!("cargo:rustc-cfg={cfg_flag}");

    println!("cargo::rustc-check-cfg=cfg(neon)");
    println!("cargo::rustc-check-cfg=cfg(sse)");
    println!("cargo::rustc-check-cfg=cfg(fallback)");
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={FORCE_FALLBACK_VAR}");

    let mut backends = SimdBackend::backends();

    TargetDetector::from_env().detect(&mut backends);

    apply(&mut backends);
}
