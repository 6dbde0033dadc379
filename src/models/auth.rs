// src/models/auth.rs

use serde::{Deserialize, Serialize};

// Estrutura de dados ("claims") dentro do JWT emitido pelo painel hospedeiro
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // Subject (ID do admin)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
    #[serde(default)]
    pub permissions: Vec<String>,
}

// O admin autenticado, como fica guardado nas extensions da requisição
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i64,
    pub permissions: Vec<String>,
}

impl Admin {
    pub fn can(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

impl From<Claims> for Admin {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            permissions: claims.permissions,
        }
    }
}
