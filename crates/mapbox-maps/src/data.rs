//! Account resources: styles, tilesets, datasets and dataset features.

use crate::client::{MapsClient, STYLES_ENDPOINT};
use crate::models::{Dataset, FeatureCollection, GeoJsonFeature, Style, StyleLayer, Tileset};
use crate::params::{
    delete_feature_params, put_feature_params, DATASET_ID, FEATURE_ID, GEOJSON_FEATURE,
};
use crate::Result;
use mapbox_core::encoding::encode_component;
use mapbox_core::{Error, ParamValue};
use serde_json::Value;

const TILESETS_ENDPOINT: &str = "tilesets/v1";
const DATASETS_ENDPOINT: &str = "datasets/v1";

impl MapsClient {
    /// Styles owned by the account.
    ///
    /// # Errors
    ///
    /// Returns an API error.
    pub async fn list_styles(&self) -> Result<Vec<Style>> {
        self.inner
            .request(STYLES_ENDPOINT)
            .append_username()
            .get_json()
            .await
    }

    /// A single style, `owner/id`, including its layers.
    ///
    /// # Errors
    ///
    /// Returns an API error.
    pub async fn style(&self, style: &str) -> Result<Style> {
        self.inner
            .request(STYLES_ENDPOINT)
            .path(style)
            .get_json()
            .await
    }

    /// Layers of a style.
    ///
    /// # Errors
    ///
    /// Returns an API error.
    pub async fn style_layers(&self, style: &str) -> Result<Vec<StyleLayer>> {
        Ok(self.style(style).await?.layers)
    }

    /// Tilesets owned by the account.
    ///
    /// # Errors
    ///
    /// Returns an API error.
    pub async fn list_tilesets(&self) -> Result<Vec<Tileset>> {
        self.inner
            .request(TILESETS_ENDPOINT)
            .append_username()
            .get_json()
            .await
    }

    /// Datasets owned by the account.
    ///
    /// # Errors
    ///
    /// Returns an API error.
    pub async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        self.inner
            .request(DATASETS_ENDPOINT)
            .append_username()
            .get_json()
            .await
    }

    /// A single dataset.
    ///
    /// # Errors
    ///
    /// Returns an API error.
    pub async fn dataset(&self, dataset_id: &str) -> Result<Dataset> {
        self.inner
            .request(DATASETS_ENDPOINT)
            .append_username()
            .path(encode_component(dataset_id))
            .get_json()
            .await
    }

    /// Every feature of a dataset.
    ///
    /// # Errors
    ///
    /// Returns an API error.
    pub async fn list_features(&self, dataset_id: &str) -> Result<FeatureCollection> {
        self.inner
            .request(DATASETS_ENDPOINT)
            .append_username()
            .path(format!("{}/features", encode_component(dataset_id)))
            .get_json()
            .await
    }

    /// Insert or replace a feature. Its `id` is set to `feature_id`.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn put_feature(
        &self,
        dataset_id: &str,
        feature_id: &str,
        feature: &GeoJsonFeature,
    ) -> Result<GeoJsonFeature> {
        let text = serde_json::to_string(feature)?;
        self.put_feature_args(vec![
            Some(dataset_id.into()),
            Some(feature_id.into()),
            Some(text.into()),
        ])
        .await
    }

    /// Insert or replace a feature from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn put_feature_args(&self, args: Vec<Option<ParamValue>>) -> Result<GeoJsonFeature> {
        let bindings = put_feature_params().bind_args(args)?;
        let dataset_id = bindings.require(DATASET_ID)?.to_string();
        let feature_id = bindings.require(FEATURE_ID)?.to_string();
        let text = bindings.require(GEOJSON_FEATURE)?.to_string();

        let mut feature: Value = serde_json::from_str(&text)?;
        let Some(fields) = feature.as_object_mut() else {
            return Err(Error::InvalidParameter(format!(
                "Entered {text}...One individual GeoJSON feature, not a FeatureCollection."
            )));
        };
        fields.insert("id".to_string(), Value::String(feature_id.clone()));

        let response = self
            .inner
            .request(DATASETS_ENDPOINT)
            .append_username()
            .path(format!(
                "{}/features/{}",
                encode_component(&dataset_id),
                encode_component(&feature_id)
            ))
            .header("Content-Type", "application/json")
            .body(feature)
            .put()
            .await?;

        Ok(serde_json::from_value(response)?)
    }

    /// Delete a feature.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn delete_feature(&self, dataset_id: &str, feature_id: &str) -> Result<()> {
        self.delete_feature_args(vec![Some(dataset_id.into()), Some(feature_id.into())])
            .await
    }

    /// Delete a feature from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn delete_feature_args(&self, args: Vec<Option<ParamValue>>) -> Result<()> {
        let bindings = delete_feature_params().bind_args(args)?;
        let dataset_id = bindings.require(DATASET_ID)?.to_string();
        let feature_id = bindings.require(FEATURE_ID)?.to_string();

        self.inner
            .request(DATASETS_ENDPOINT)
            .append_username()
            .path(format!(
                "{}/features/{}",
                encode_component(&dataset_id),
                encode_component(&feature_id)
            ))
            .delete()
            .await?;
        Ok(())
    }
}
