use serde::{Deserialize, Serialize};

/// Order lifecycle.
///
/// `Saida → Finalizado` when the return is recorded, `Saida → Cancelado`
/// otherwise; both are terminal. The server enforces this, the front end only
/// uses it to decide which orders may be offered for return entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PedidoStatus {
    #[default]
    Saida,
    /// `retorno` is the backend's legacy name for a recorded return
    #[serde(alias = "retorno")]
    Finalizado,
    Cancelado,
}

impl PedidoStatus {
    pub const ALL: [PedidoStatus; 3] = [Self::Saida, Self::Finalizado, Self::Cancelado];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Saida => "saida",
            Self::Finalizado => "finalizado",
            Self::Cancelado => "cancelado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Saida => "Em aberto",
            Self::Finalizado => "Finalizado",
            Self::Cancelado => "Cancelado",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "saida" | "em_aberto" => Some(Self::Saida),
            "finalizado" | "retorno" => Some(Self::Finalizado),
            "cancelado" => Some(Self::Cancelado),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Saida)
    }

    pub fn is_open_for_return(&self) -> bool {
        matches!(self, Self::Saida)
    }

    pub fn can_transition_to(&self, next: PedidoStatus) -> bool {
        matches!(
            (self, next),
            (Self::Saida, Self::Finalizado) | (Self::Saida, Self::Cancelado)
        )
    }
}

impl std::fmt::Display for PedidoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(PedidoStatus::Saida.can_transition_to(PedidoStatus::Finalizado));
        assert!(PedidoStatus::Saida.can_transition_to(PedidoStatus::Cancelado));
        for from in [PedidoStatus::Finalizado, PedidoStatus::Cancelado] {
            assert!(from.is_terminal());
            for to in PedidoStatus::ALL {
                assert!(!from.can_transition_to(to));
            }
        }
        assert!(!PedidoStatus::Saida.can_transition_to(PedidoStatus::Saida));
    }

    #[test]
    fn test_decode_legacy_retorno() {
        let s: PedidoStatus = serde_json::from_str(r#""retorno""#).unwrap();
        assert_eq!(s, PedidoStatus::Finalizado);
        assert!(serde_json::from_str::<PedidoStatus>(r#""perdido""#).is_err());
        assert_eq!(serde_json::to_string(&PedidoStatus::Saida).unwrap(), r#""saida""#);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(PedidoStatus::from_code("EM_ABERTO"), Some(PedidoStatus::Saida));
        assert_eq!(PedidoStatus::from_code("cancelado"), Some(PedidoStatus::Cancelado));
        assert_eq!(PedidoStatus::from_code(""), None);
    }
}
