//! Workload type definitions

/// Supported benchmark workload types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenchKind {
    /// Cache vs. main-memory per-access latency
    Latency,
    /// Per-thread latency at increasing thread counts
    Scaling,
    /// Bandwidth under varying granularity and read/write ratio
    Bandwidth,
    /// Strided read-modify-write sweep (TLB sensitivity)
    Stride,
    /// Matrix multiply cache effects
    Matmul,
    /// Single-threaded vs. queue-pool compression
    Compress,
}

impl BenchKind {
    /// Parse workload type from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "latency" | "lat" => Some(Self::Latency),
            "scaling" | "thread-scaling" | "threads" => Some(Self::Scaling),
            "bandwidth" | "bw" => Some(Self::Bandwidth),
            "stride" | "tlb" => Some(Self::Stride),
            "matmul" | "matrix" => Some(Self::Matmul),
            "compress" | "compression" => Some(Self::Compress),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latency => "LATENCY",
            Self::Scaling => "SCALING",
            Self::Bandwidth => "BANDWIDTH",
            Self::Stride => "STRIDE",
            Self::Matmul => "MATMUL",
            Self::Compress => "COMPRESS",
        }
    }

    /// Check if workload launches worker threads
    pub fn is_multithreaded(&self) -> bool {
        matches!(self, Self::Scaling | Self::Matmul | Self::Compress)
    }
}

impl std::fmt::Display for BenchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workload_types() {
        assert_eq!(BenchKind::parse("latency"), Some(BenchKind::Latency));
        assert_eq!(BenchKind::parse("LATENCY"), Some(BenchKind::Latency));
        assert_eq!(BenchKind::parse("tlb"), Some(BenchKind::Stride));
        assert_eq!(BenchKind::parse("thread-scaling"), Some(BenchKind::Scaling));
        assert_eq!(BenchKind::parse("unknown"), None);
    }

    #[test]
    fn test_is_multithreaded() {
        assert!(BenchKind::Scaling.is_multithreaded());
        assert!(BenchKind::Compress.is_multithreaded());
        assert!(!BenchKind::Latency.is_multithreaded());
        assert!(!BenchKind::Stride.is_multithreaded());
    }
}
