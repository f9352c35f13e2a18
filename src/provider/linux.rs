// Linux-specific CPU identity helpers: /proc/cpuinfo and cpufreq.

/// CPU model from /proc/cpuinfo (Linux). Preferred over sysinfo, which may report "cpu0".
pub(super) fn read_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        parse_model_name(&content)
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// First non-empty "model name" entry of a /proc/cpuinfo dump.
pub fn parse_model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter(|line| line.starts_with("model name"))
        .filter_map(|line| line.split_once(':').map(|(_, v)| v.trim()))
        .find(|v| !v.is_empty() && *v != "cpu0")
        .map(str::to_string)
}

/// Base clock of cpu0 in GHz from cpufreq (Linux). Falls back to the max frequency
/// on drivers that do not expose `base_frequency`.
pub(super) fn read_base_speed_ghz() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        const CPUFREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq";
        ["base_frequency", "cpuinfo_max_freq"]
            .iter()
            .filter_map(|f| std::fs::read_to_string(format!("{CPUFREQ}/{f}")).ok())
            .find_map(|s| parse_khz_as_ghz(&s))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Parse a cpufreq value (kHz) into GHz. Zero and garbage are rejected.
pub fn parse_khz_as_ghz(s: &str) -> Option<f64> {
    let khz = s.trim().parse::<u64>().ok().filter(|&k| k > 0)?;
    Some(khz as f64 / 1_000_000.0)
}
