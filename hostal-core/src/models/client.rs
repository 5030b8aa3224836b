use serde::{Deserialize, Serialize};

/// Hotel guest record linked to an identity-provider user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Client {
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            self.id
                .map(|id| format!("Client #{}", id))
                .unwrap_or_else(|| "Unknown client".to_string())
        } else {
            parts.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let client = Client {
            first_name: Some("Ana".to_string()),
            last_name: Some("Rojas".to_string()),
            ..Default::default()
        };
        assert_eq!(client.full_name(), "Ana Rojas");
        assert_eq!(Client::reference(7).full_name(), "Client #7");
        assert_eq!(Client::default().full_name(), "Unknown client");
    }
}
