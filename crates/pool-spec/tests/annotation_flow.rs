//! End-to-end tests for resolving pool specs from resource annotations

use edgelb_client::{MockEdgeLbClient, Pool};
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec as K8sServiceSpec};
use k8s_openapi::api::networking::v1::{Ingress, IngressSpec as K8sIngressSpec, IngressTLS};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use pool_spec::constants::{EDGELB_POOL_CONFIG_ANNOTATION, HOST_NETWORK};
use pool_spec::{
    get_ingress_spec, get_service_spec, previous_ingress_spec, previous_service_spec, set_ingress_spec,
    set_service_spec, CreationStrategy, HttpMode, NameGenerationPolicy, ServiceFrontend, SpecContext, SpecError,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

const AWS_NLB: &str = r#"{"aws":{"elbs":[{"type":"NLB","listeners":[{"port":80,"linkFrontend":"http"}]}]}}"#;

fn metadata(name: &str, annotation: Option<&str>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some("default".to_string()),
        annotations: annotation.map(|raw| BTreeMap::from([(EDGELB_POOL_CONFIG_ANNOTATION.to_string(), raw.to_string())])),
        ..Default::default()
    }
}

fn ingress(annotation: Option<&str>, tls: bool) -> Ingress {
    Ingress {
        metadata: metadata("web", annotation),
        spec: Some(K8sIngressSpec {
            tls: tls.then(|| {
                vec![IngressTLS {
                    hosts: Some(vec!["web.example.com".to_string()]),
                    secret_name: Some("web-tls".to_string()),
                }]
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn service(annotation: Option<&str>, ports: &[i32]) -> Service {
    Service {
        metadata: metadata("redis", annotation),
        spec: Some(K8sServiceSpec {
            ports: Some(
                ports
                    .iter()
                    .map(|&port| ServicePort {
                        port,
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn ctx() -> SpecContext {
    SpecContext::new("dev/kubernetes01")
}

#[tokio::test]
async fn test_service_without_annotation() {
    let mut svc = service(None, &[6379]);
    assert!(previous_service_spec(&svc).unwrap().is_none());

    let spec = get_service_spec(&svc, &ctx()).await.unwrap();
    assert_eq!(spec.frontends, vec![ServiceFrontend::new(6379, 6379)]);
    assert!(spec.base.name().unwrap().starts_with("dev--kubernetes01--"));
    assert_eq!(spec.base.creation_strategy, Some(CreationStrategy::IfNotPresent));

    set_service_spec(&mut svc, &spec).unwrap();
    let stored = previous_service_spec(&svc).unwrap().unwrap();
    assert_eq!(stored, spec);

    // a stored, resolved spec resolves to itself
    let again = get_service_spec(&svc, &ctx()).await.unwrap();
    assert_eq!(again, spec);
    again.validate_transition(&stored).unwrap();
}

#[tokio::test]
async fn test_service_duplicate_service_port_override() {
    let svc = service(
        Some("name: redis\nfrontends:\n- servicePort: 6379\n  port: 16379\n- servicePort: 6379\n  port: 26379\n"),
        &[6379],
    );

    // overrides collapse onto the Service's ports, first one wins
    let spec = get_service_spec(&svc, &ctx()).await.unwrap();
    assert_eq!(spec.frontends, vec![ServiceFrontend::new(6379, 16379)]);
}

#[tokio::test]
async fn test_ingress_with_tls() {
    let mut ing = ingress(Some("name: web\nfrontends:\n  http:\n    mode: Redirect\n"), true);

    let spec = get_ingress_spec(&ing, &ctx()).await.unwrap();
    let frontends = spec.frontends.clone().unwrap();
    assert_eq!(spec.base.name(), Some("web"));
    assert_eq!(spec.http_mode(), HttpMode::Redirect);
    assert_eq!(frontends.http.unwrap().port, Some(80));
    assert_eq!(frontends.https.unwrap().port, Some(443));

    set_ingress_spec(&mut ing, &spec).unwrap();
    assert_eq!(previous_ingress_spec(&ing).unwrap(), Some(spec));
}

#[tokio::test]
async fn test_ingress_name_change_is_rejected() {
    let mut ing = ingress(Some("name: a\n"), false);
    let previous = get_ingress_spec(&ing, &ctx()).await.unwrap();
    set_ingress_spec(&mut ing, &previous).unwrap();

    ing.metadata
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .insert(EDGELB_POOL_CONFIG_ANNOTATION.to_string(), "name: b\n".to_string());
    let current = get_ingress_spec(&ing, &ctx()).await.unwrap();

    let err = current.validate_transition(&previous).unwrap_err();
    assert!(matches!(err, SpecError::Transition { ref field, .. } if field == "name"));
}

#[tokio::test]
async fn test_ingress_introducing_cloud_provider() {
    let previous = get_ingress_spec(&ingress(Some("name: a\n"), false), &ctx()).await.unwrap();

    let raw = format!("name: a\ncloudProviderConfiguration: '{}'\n", AWS_NLB);
    let current = get_ingress_spec(&ingress(Some(&raw), false), &ctx()).await.unwrap();

    assert!(current.base.name().unwrap().starts_with("cloud--dev--kubernetes01--"));
    assert_eq!(current.base.network(), HOST_NETWORK);
    current.validate_transition(&previous).unwrap();

    // and it cannot be taken away again
    let err = previous.validate_transition(&current).unwrap_err();
    assert_eq!(err.field(), Some("cloudProviderConfiguration"));
}

#[tokio::test]
async fn test_public_role_on_virtual_network_is_rejected() {
    let ing = ingress(Some("name: web\nrole: slave_public\nnetwork: dcos\n"), false);
    let err = get_ingress_spec(&ing, &ctx()).await.unwrap_err();
    assert_eq!(err.field(), Some("network"));
}

#[tokio::test]
async fn test_unknown_annotation_field_is_rejected() {
    let ing = ingress(Some("name: web\nbackends: []\n"), false);
    let err = get_ingress_spec(&ing, &ctx()).await.unwrap_err();
    assert!(matches!(err, SpecError::Decode { ref key, .. } if key == EDGELB_POOL_CONFIG_ANNOTATION));

    let svc = service(Some("{"), &[80]);
    assert!(matches!(previous_service_spec(&svc), Err(SpecError::Decode { .. })));
}

#[tokio::test]
async fn test_generated_name_avoids_existing_pools() {
    let mock = MockEdgeLbClient::new("http://test-edgelb");
    mock.add_pool(Pool::new("unrelated", "slave_public"));
    mock.push_taken();

    let ctx = ctx()
        .with_registry(Arc::new(mock.clone()))
        .with_name_policy(NameGenerationPolicy {
            max_attempts: 5,
            lookup_timeout: Duration::from_millis(100),
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
        });

    let spec = get_service_spec(&service(None, &[6379]), &ctx).await.unwrap();
    let lookups = mock.lookups();
    assert_eq!(lookups.len(), 2);
    assert_eq!(spec.base.name(), Some(lookups[1].as_str()));
}

#[tokio::test]
async fn test_explicit_name_skips_the_registry() {
    let mock = MockEdgeLbClient::new("http://test-edgelb");
    let ctx = ctx().with_registry(Arc::new(mock.clone()));

    let spec = get_service_spec(&service(Some("name: redis\n"), &[6379]), &ctx).await.unwrap();
    assert_eq!(spec.base.name(), Some("redis"));
    assert!(mock.lookups().is_empty());
}
