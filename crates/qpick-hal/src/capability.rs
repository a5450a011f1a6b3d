//! Backend capabilities.

use serde::{Deserialize, Serialize};

/// What a backend can run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend or device name.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Gates accepted by `validate()`.
    pub gate_set: GateSet,
    /// Maximum shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Free-form feature tags.
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities for the local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["statevector".into(), "seedable".into()],
        }
    }

    /// Capabilities for IBM Quantum devices.
    pub fn ibm(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_set: GateSet::ibm_heron(),
            max_shots: 100_000,
            is_simulator: false,
            features: vec!["provider_transpilation".into()],
        }
    }

    /// Replace the gate set.
    pub fn with_gate_set(mut self, gate_set: GateSet) -> Self {
        self.gate_set = gate_set;
        self
    }
}

/// Gate names a backend accepts, and the subset it executes natively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateSet {
    /// Gates accepted on submission.
    pub supported: Vec<String>,
    /// Gates the hardware executes without translation.
    pub native: Vec<String>,
}

impl GateSet {
    /// A gate set where every supported gate is native.
    pub fn new<I, S>(gates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let supported: Vec<String> = gates.into_iter().map(Into::into).collect();
        Self {
            native: supported.clone(),
            supported,
        }
    }

    /// Every gate in the qpick IR.
    pub fn universal() -> Self {
        Self::new(["x", "z", "h"])
    }

    /// IBM Heron processors.
    ///
    /// Native gates are `cz, rz, sx, x`. `h` and `z` are accepted because
    /// the provider translates them during its own transpilation pass.
    pub fn ibm_heron() -> Self {
        Self {
            supported: ["cz", "rz", "sx", "x", "h", "z"]
                .into_iter()
                .map(String::from)
                .collect(),
            native: ["cz", "rz", "sx", "x"].into_iter().map(String::from).collect(),
        }
    }

    /// Whether the gate is accepted.
    pub fn contains(&self, gate: &str) -> bool {
        self.supported.iter().any(|g| g == gate)
    }

    /// Whether the gate runs natively.
    pub fn is_native(&self, gate: &str) -> bool {
        self.native.iter().any(|g| g == gate)
    }
}
