//! Product shelf from the REST `GET /produtos` listing.

use commerce_apps_core::Product;
use serde::Deserialize;
use tracing::instrument;

use crate::client::{RestResponse, STALE};
use crate::context::InvokeContext;
use crate::error::Result;
use crate::wake::Wake;
use crate::wake::transform::{CAMPOS_ADICIONAIS, rest_to_product};
use crate::wake::types::RestProduct;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    /// Number of products to return (max 50).
    pub quantidade_registros: Option<u32>,
    /// Only products marked as valid.
    pub somente_validos: Option<bool>,
    #[serde(default)]
    pub categorias: Vec<String>,
    #[serde(default)]
    pub fabricantes: Vec<String>,
    #[serde(default)]
    pub centros_distribuicao: Vec<String>,
    /// `aaaa-mm-dd hh:mm:ss`, at most 48 hours back.
    pub alterados_partir_de: Option<String>,
    /// 1-based page.
    pub pagina: Option<u32>,
}

impl Props {
    /// Query string for `/produtos`: lists joined with `,`, empty lists
    /// omitted, every extra field group requested.
    fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key.to_string(), value));
            }
        };
        let joined = |list: &[String]| (!list.is_empty()).then(|| list.join(","));

        push("quantidadeRegistros", self.quantidade_registros.map(|v| v.to_string()));
        push("somenteValidos", self.somente_validos.map(|v| v.to_string()));
        push("categorias", joined(self.categorias.as_slice()));
        push("fabricantes", joined(self.fabricantes.as_slice()));
        push("centrosDistribuicao", joined(self.centros_distribuicao.as_slice()));
        push("alteradosPartirDe", self.alterados_partir_de.clone());
        push("pagina", self.pagina.map(|v| v.to_string()));

        for campo in CAMPOS_ADICIONAIS {
            query.push(("camposAdicionais".to_string(), campo.to_string()));
        }
        query
    }
}

/// List product variants.
///
/// # Errors
///
/// Returns the client error of the REST call.
#[instrument(skip(wake, ctx))]
pub async fn loader(wake: &Wake, props: Props, ctx: &InvokeContext) -> Result<Vec<Product>> {
    let response: RestResponse<Vec<RestProduct>> =
        wake.api.get("/produtos", &props.query(), STALE).await?;

    Ok(response
        .body
        .iter()
        .map(|variant| rest_to_product(variant, &ctx.url))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_joins_lists_and_skips_empty() {
        let props = Props {
            quantidade_registros: Some(10),
            categorias: vec!["1".to_string(), "2".to_string()],
            ..Default::default()
        };

        let query = props.query();
        assert_eq!(query[0], ("quantidadeRegistros".to_string(), "10".to_string()));
        assert_eq!(query[1], ("categorias".to_string(), "1,2".to_string()));
        assert!(!query.iter().any(|(k, _)| k == "fabricantes"));
        assert_eq!(
            query.iter().filter(|(k, _)| k == "camposAdicionais").count(),
            CAMPOS_ADICIONAIS.len()
        );
    }
}
