// src/models/lead.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Número fixo de colunas de um lead na planilha (A..T).
pub const LEAD_COLUMNS: usize = 20;

pub const ESTADO_ACTIVO: &str = "Activo";
pub const ESTADO_INACTIVO: &str = "Inactivo";
pub const TIPO_PAGO_CREDITO: &str = "Crédito";

/// Etapas conhecidas do funil, na ordem em que aparecem nas estatísticas.
pub const PIPELINE_STAGES: [&str; 4] = ["Prospección", "Contacto", "Negociación", "Cierre"];
pub const DEFAULT_ESTADOS: [&str; 2] = [ESTADO_ACTIVO, ESTADO_INACTIVO];

// --- COLUNAS ---

// A ordem das variantes É a ordem das colunas na planilha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeadColumn {
    Id,
    Nombre,
    Telefono,
    Email,
    Fuente,
    Registro,
    ProductoInteres,
    Estado,
    Pipeline,
    Vendedor,
    Comentarios,
    FechaUltimoContacto,
    ProximaAccion,
    FechaProximaAccion,
    Conversacion,
    TipoPago,
    MontoPendiente,
    Comprobante,
    FechaCreacion,
    FechaModificacion,
}

impl LeadColumn {
    pub const ALL: [LeadColumn; LEAD_COLUMNS] = [
        LeadColumn::Id,
        LeadColumn::Nombre,
        LeadColumn::Telefono,
        LeadColumn::Email,
        LeadColumn::Fuente,
        LeadColumn::Registro,
        LeadColumn::ProductoInteres,
        LeadColumn::Estado,
        LeadColumn::Pipeline,
        LeadColumn::Vendedor,
        LeadColumn::Comentarios,
        LeadColumn::FechaUltimoContacto,
        LeadColumn::ProximaAccion,
        LeadColumn::FechaProximaAccion,
        LeadColumn::Conversacion,
        LeadColumn::TipoPago,
        LeadColumn::MontoPendiente,
        LeadColumn::Comprobante,
        LeadColumn::FechaCreacion,
        LeadColumn::FechaModificacion,
    ];

    /// Colunas que o cliente pode escrever num update (índices 1..=17).
    pub const EDITABLE: [LeadColumn; 17] = [
        LeadColumn::Nombre,
        LeadColumn::Telefono,
        LeadColumn::Email,
        LeadColumn::Fuente,
        LeadColumn::Registro,
        LeadColumn::ProductoInteres,
        LeadColumn::Estado,
        LeadColumn::Pipeline,
        LeadColumn::Vendedor,
        LeadColumn::Comentarios,
        LeadColumn::FechaUltimoContacto,
        LeadColumn::ProximaAccion,
        LeadColumn::FechaProximaAccion,
        LeadColumn::Conversacion,
        LeadColumn::TipoPago,
        LeadColumn::MontoPendiente,
        LeadColumn::Comprobante,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Nome do campo no JSON e no cabeçalho da planilha.
    pub const fn key(self) -> &'static str {
        match self {
            LeadColumn::Id => "id",
            LeadColumn::Nombre => "nombre",
            LeadColumn::Telefono => "telefono",
            LeadColumn::Email => "email",
            LeadColumn::Fuente => "fuente",
            LeadColumn::Registro => "registro",
            LeadColumn::ProductoInteres => "producto_interes",
            LeadColumn::Estado => "estado",
            LeadColumn::Pipeline => "pipeline",
            LeadColumn::Vendedor => "vendedor",
            LeadColumn::Comentarios => "comentarios",
            LeadColumn::FechaUltimoContacto => "fecha_ultimo_contacto",
            LeadColumn::ProximaAccion => "proxima_accion",
            LeadColumn::FechaProximaAccion => "fecha_proxima_accion",
            LeadColumn::Conversacion => "conversacion",
            LeadColumn::TipoPago => "tipo_pago",
            LeadColumn::MontoPendiente => "monto_pendiente",
            LeadColumn::Comprobante => "comprobante",
            LeadColumn::FechaCreacion => "fecha_creacion",
            LeadColumn::FechaModificacion => "fecha_modificacion",
        }
    }

    /// Linha de cabeçalho usada pela planilha em memória.
    pub fn header_row() -> Vec<String> {
        Self::ALL.iter().map(|c| c.key().to_string()).collect()
    }
}

/// Completa a linha com células vazias até ter exatamente 20 posições.
/// A API do Sheets omite as células vazias do fim da linha.
pub fn pad_row(mut row: Vec<String>) -> Vec<String> {
    row.resize(LEAD_COLUMNS, String::new());
    row
}

// --- LEAD (o registro) ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Lead {
    /// Posição (1-based) da linha dentro do intervalo de dados.
    #[schema(example = 1)]
    pub id: u32,
    #[schema(example = "Ana Pérez")]
    pub nombre: String,
    #[schema(example = "5551234567")]
    pub telefono: String,
    pub email: String,
    #[schema(example = "Facebook")]
    pub fuente: String,
    pub registro: String,
    pub producto_interes: String,
    #[schema(example = "Activo")]
    pub estado: String,
    #[schema(example = "Prospección")]
    pub pipeline: String,
    pub vendedor: String,
    pub comentarios: String,
    pub fecha_ultimo_contacto: String,
    pub proxima_accion: String,
    pub fecha_proxima_accion: String,
    pub conversacion: String,
    #[schema(example = "Crédito")]
    pub tipo_pago: String,
    #[schema(example = "150.00")]
    pub monto_pendiente: String,
    pub comprobante: String,
    pub fecha_creacion: String,
    pub fecha_modificacion: String,
}

impl Lead {
    /// Monta o lead a partir das células cruas. O `id` vem da posição da linha,
    /// não da coluna A.
    pub fn from_row(id: u32, row: Vec<String>) -> Self {
        let mut cells = pad_row(row).into_iter().skip(1);
        let mut next = || cells.next().unwrap_or_default();
        Self {
            id,
            nombre: next(),
            telefono: next(),
            email: next(),
            fuente: next(),
            registro: next(),
            producto_interes: next(),
            estado: next(),
            pipeline: next(),
            vendedor: next(),
            comentarios: next(),
            fecha_ultimo_contacto: next(),
            proxima_accion: next(),
            fecha_proxima_accion: next(),
            conversacion: next(),
            tipo_pago: next(),
            monto_pendiente: next(),
            comprobante: next(),
            fecha_creacion: next(),
            fecha_modificacion: next(),
        }
    }

    pub fn get(&self, column: LeadColumn) -> &str {
        match column {
            // O id não é texto; quem precisa dele usa `self.id`.
            LeadColumn::Id => "",
            LeadColumn::Nombre => &self.nombre,
            LeadColumn::Telefono => &self.telefono,
            LeadColumn::Email => &self.email,
            LeadColumn::Fuente => &self.fuente,
            LeadColumn::Registro => &self.registro,
            LeadColumn::ProductoInteres => &self.producto_interes,
            LeadColumn::Estado => &self.estado,
            LeadColumn::Pipeline => &self.pipeline,
            LeadColumn::Vendedor => &self.vendedor,
            LeadColumn::Comentarios => &self.comentarios,
            LeadColumn::FechaUltimoContacto => &self.fecha_ultimo_contacto,
            LeadColumn::ProximaAccion => &self.proxima_accion,
            LeadColumn::FechaProximaAccion => &self.fecha_proxima_accion,
            LeadColumn::Conversacion => &self.conversacion,
            LeadColumn::TipoPago => &self.tipo_pago,
            LeadColumn::MontoPendiente => &self.monto_pendiente,
            LeadColumn::Comprobante => &self.comprobante,
            LeadColumn::FechaCreacion => &self.fecha_creacion,
            LeadColumn::FechaModificacion => &self.fecha_modificacion,
        }
    }

    pub fn is_active(&self) -> bool {
        self.estado == ESTADO_ACTIVO
    }
}

// --- PAYLOAD (o que o cliente envia) ---

/// Campos aceitos em POST/PUT de leads. Ausente = não mexer; `null` = célula vazia.
/// Chaves desconhecidas são ignoradas.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct LeadPayload {
    #[serde(default, deserialize_with = "cell_text")]
    #[schema(example = "Ana Pérez")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    #[schema(example = "5551234567")]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub fuente: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub registro: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub producto_interes: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub estado: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub pipeline: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub vendedor: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub comentarios: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub fecha_ultimo_contacto: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub proxima_accion: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub fecha_proxima_accion: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub conversacion: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub tipo_pago: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    #[schema(example = "150.00")]
    pub monto_pendiente: Option<String>,
    #[serde(default, deserialize_with = "cell_text")]
    pub comprobante: Option<String>,
}

impl LeadPayload {
    /// Payload com um único campo preenchido (usado pelo soft delete e pelas opções).
    pub fn single(column: LeadColumn, value: impl Into<String>) -> Self {
        let mut payload = Self::default();
        if let Some(slot) = payload.slot_mut(column) {
            *slot = Some(value.into());
        }
        payload
    }

    pub fn get(&self, column: LeadColumn) -> Option<&str> {
        self.slot(column).and_then(|v| v.as_deref())
    }

    /// Pares (coluna, valor) presentes no payload, na ordem das colunas.
    pub fn changes(&self) -> Vec<(LeadColumn, &str)> {
        LeadColumn::EDITABLE
            .iter()
            .filter_map(|&column| self.get(column).map(|value| (column, value)))
            .collect()
    }

    // Tabela campo -> coluna. Colunas fora de EDITABLE não têm slot.
    fn slot(&self, column: LeadColumn) -> Option<&Option<String>> {
        let slot = match column {
            LeadColumn::Nombre => &self.nombre,
            LeadColumn::Telefono => &self.telefono,
            LeadColumn::Email => &self.email,
            LeadColumn::Fuente => &self.fuente,
            LeadColumn::Registro => &self.registro,
            LeadColumn::ProductoInteres => &self.producto_interes,
            LeadColumn::Estado => &self.estado,
            LeadColumn::Pipeline => &self.pipeline,
            LeadColumn::Vendedor => &self.vendedor,
            LeadColumn::Comentarios => &self.comentarios,
            LeadColumn::FechaUltimoContacto => &self.fecha_ultimo_contacto,
            LeadColumn::ProximaAccion => &self.proxima_accion,
            LeadColumn::FechaProximaAccion => &self.fecha_proxima_accion,
            LeadColumn::Conversacion => &self.conversacion,
            LeadColumn::TipoPago => &self.tipo_pago,
            LeadColumn::MontoPendiente => &self.monto_pendiente,
            LeadColumn::Comprobante => &self.comprobante,
            LeadColumn::Id | LeadColumn::FechaCreacion | LeadColumn::FechaModificacion => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, column: LeadColumn) -> Option<&mut Option<String>> {
        let slot = match column {
            LeadColumn::Nombre => &mut self.nombre,
            LeadColumn::Telefono => &mut self.telefono,
            LeadColumn::Email => &mut self.email,
            LeadColumn::Fuente => &mut self.fuente,
            LeadColumn::Registro => &mut self.registro,
            LeadColumn::ProductoInteres => &mut self.producto_interes,
            LeadColumn::Estado => &mut self.estado,
            LeadColumn::Pipeline => &mut self.pipeline,
            LeadColumn::Vendedor => &mut self.vendedor,
            LeadColumn::Comentarios => &mut self.comentarios,
            LeadColumn::FechaUltimoContacto => &mut self.fecha_ultimo_contacto,
            LeadColumn::ProximaAccion => &mut self.proxima_accion,
            LeadColumn::FechaProximaAccion => &mut self.fecha_proxima_accion,
            LeadColumn::Conversacion => &mut self.conversacion,
            LeadColumn::TipoPago => &mut self.tipo_pago,
            LeadColumn::MontoPendiente => &mut self.monto_pendiente,
            LeadColumn::Comprobante => &mut self.comprobante,
            LeadColumn::Id | LeadColumn::FechaCreacion | LeadColumn::FechaModificacion => return None,
        };
        Some(slot)
    }
}

// O frontend às vezes manda números (monto_pendiente: 150) ou null.
// Tudo vira texto de célula; null vira célula vazia.
fn cell_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn short_rows_are_padded_to_twenty_cells() {
        let lead = Lead::from_row(3, cells(&["3", "Ana", "555"]));
        assert_eq!(lead.id, 3);
        assert_eq!(lead.nombre, "Ana");
        assert_eq!(lead.telefono, "555");
        assert_eq!(lead.fecha_modificacion, "");
        assert_eq!(pad_row(cells(&["x"])).len(), LEAD_COLUMNS);
    }

    #[test]
    fn id_comes_from_position_not_column_a() {
        let lead = Lead::from_row(7, cells(&["99", "Luis"]));
        assert_eq!(lead.id, 7);
    }

    #[test]
    fn column_keys_follow_sheet_order() {
        assert_eq!(LeadColumn::Estado.index(), 7);
        assert_eq!(LeadColumn::Comprobante.index(), 17);
        assert_eq!(LeadColumn::FechaModificacion.index(), 19);
        assert_eq!(LeadColumn::header_row()[16], "monto_pendiente");
    }

    #[test]
    fn payload_accepts_numbers_and_null_and_ignores_unknown_keys() {
        let payload: LeadPayload = serde_json::from_value(json!({
            "nombre": "Ana",
            "monto_pendiente": 150,
            "comentarios": null,
            "id": 42,
            "color_favorito": "azul"
        }))
        .unwrap();

        assert_eq!(payload.get(LeadColumn::MontoPendiente), Some("150"));
        assert_eq!(payload.get(LeadColumn::Comentarios), Some(""));
        assert_eq!(payload.get(LeadColumn::Telefono), None);
        assert_eq!(
            payload.changes(),
            vec![
                (LeadColumn::Nombre, "Ana"),
                (LeadColumn::Comentarios, ""),
                (LeadColumn::MontoPendiente, "150"),
            ]
        );
    }

    #[test]
    fn single_ignores_non_editable_columns() {
        assert!(LeadPayload::single(LeadColumn::FechaCreacion, "x").changes().is_empty());
        assert_eq!(
            LeadPayload::single(LeadColumn::Estado, ESTADO_INACTIVO).changes(),
            vec![(LeadColumn::Estado, ESTADO_INACTIVO)]
        );
    }
}
