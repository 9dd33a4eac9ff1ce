use crate::domain::common::{datetime, AggregateRoot};
use crate::shared::decode::{DecodeError, Validate};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Cliente (ambulante) id
    ClienteId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClienteStatus {
    #[default]
    Ativo,
    Inativo,
}

/// Cliente/ambulante: the consignment seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: ClienteId,
    pub nome: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub status: ClienteStatus,
    /// Saldo de dívida ajustado manualmente, fora do fechamento de pedidos
    #[serde(default)]
    pub divida_acumulada: Decimal,
    /// Débitos abertos menos abatimentos, calculado no servidor
    #[serde(default)]
    pub divida_pendente_total: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "datetime::deserialize_opt",
        serialize_with = "datetime::serialize_opt"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "datetime::deserialize_opt",
        serialize_with = "datetime::serialize_opt"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Cliente {
    pub fn is_active(&self) -> bool {
        self.status == ClienteStatus::Ativo
    }

    /// Outstanding balance shown on the debt screens; prefers the server-side
    /// pending total when present.
    pub fn saldo_devedor(&self) -> Decimal {
        self.divida_pendente_total
            .unwrap_or(self.divida_acumulada)
            .max(Decimal::ZERO)
    }
}

impl Validate for Cliente {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.nome.trim().is_empty() {
            return Err(DecodeError::invalid("nome", "vazio"));
        }
        Ok(())
    }
}

impl AggregateRoot for Cliente {
    type Id = ClienteId;

    fn collection_name() -> &'static str {
        "clientes"
    }

    fn element_name() -> &'static str {
        "Cliente"
    }
}

/// One recorded debt of a cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividaRegistro {
    pub id_divida: i64,
    pub valor_divida: Decimal,
    #[serde(default)]
    pub valor_pago: Decimal,
    #[serde(default)]
    pub saldo: Decimal,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "datetime::deserialize_opt",
        serialize_with = "datetime::serialize_opt"
    )]
    pub data_registro: Option<NaiveDateTime>,
}

/// Response of `GET /api/clientes/{id}/divida-pendente`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividaPendente {
    pub cliente_id: ClienteId,
    #[serde(default)]
    pub cliente_nome: Option<String>,
    #[serde(default)]
    pub divida_total: Decimal,
    #[serde(default)]
    pub saldo_devedor: Decimal,
    #[serde(default)]
    pub quantidade_dividas: u32,
    #[serde(default)]
    pub dividas: Vec<DividaRegistro>,
}

impl Validate for DividaPendente {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::decode::decode_json;

    #[test]
    fn test_decode_backend_cliente() {
        let json = r#"{
            "id": 3, "nome": "João", "email": null, "telefone": "119999",
            "cpf": null, "endereco": null, "status": "ativo",
            "divida_acumulada": 12.5, "divida_pendente_total": 40.0,
            "created_at": "2025-01-10T09:00:00.000001", "updated_at": null
        }"#;
        let c: Cliente = decode_json(json).unwrap();
        assert_eq!(c.id, ClienteId(3));
        assert!(c.is_active());
        assert_eq!(c.saldo_devedor(), Decimal::from(40));
    }

    #[test]
    fn test_saldo_falls_back_to_accumulated() {
        let c: Cliente =
            decode_json(r#"{"id": 1, "nome": "Ana", "status": "inativo", "divida_acumulada": 7}"#)
                .unwrap();
        assert!(!c.is_active());
        assert_eq!(c.saldo_devedor(), Decimal::from(7));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = decode_json::<Cliente>(r#"{"id": 1, "nome": "  "}"#).unwrap_err();
        assert_eq!(err, DecodeError::invalid("nome", "vazio"));
    }
}
