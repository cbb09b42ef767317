//! Cloud provider configuration carried by cloud-backed pools.
//!
//! The schema belongs to Edge-LB; this crate only needs to know that the
//! payload decodes, so the types mirror the Edge-LB v2 `cloudProvider` object
//! and reject anything they do not recognize.

use serde::{Deserialize, Serialize};

/// Edge-LB `cloudProvider` object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CloudProvider {
    /// AWS integration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsCloudProvider>,
}

/// AWS resources provisioned for the pool
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AwsCloudProvider {
    /// Load balancers fronting the pool
    #[serde(default)]
    pub elbs: Vec<AwsElb>,
}

/// An AWS elastic load balancer fronting the pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AwsElb {
    /// Load balancer name; generated by Edge-LB when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only network load balancers are supported by Edge-LB
    #[serde(rename = "type")]
    pub elb_type: String,
    /// Internal (VPC-only) rather than internet-facing
    #[serde(default)]
    pub internal: bool,
    /// Subnet IDs the load balancer is placed in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<String>,
    /// Ports the load balancer listens on
    #[serde(default)]
    pub listeners: Vec<AwsElbListener>,
    /// Tags applied to the load balancer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<AwsElbTag>,
}

/// A load balancer listener
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AwsElbListener {
    /// Port exposed by the load balancer
    pub port: i32,
    /// Name of the pool frontend traffic is forwarded to
    pub link_frontend: String,
}

/// An AWS resource tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AwsElbTag {
    /// Tag key
    pub key: String,
    /// Tag value
    pub value: String,
}

impl CloudProvider {
    /// Decode a raw cloud provider configuration string
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aws_nlb() {
        let raw = r#"{"aws":{"elbs":[{"type":"NLB","internal":false,"listeners":[{"port":80,"linkFrontend":"http"}],"tags":[{"key":"team","value":"edge"}]}]}}"#;
        let provider = CloudProvider::parse(raw).unwrap();

        let elbs = &provider.aws.unwrap().elbs;
        assert_eq!(elbs.len(), 1);
        assert_eq!(elbs[0].elb_type, "NLB");
        assert_eq!(elbs[0].listeners[0].link_frontend, "http");
    }

    #[test]
    fn test_parse_rejects_unknown_fields_and_garbage() {
        assert!(CloudProvider::parse(r#"{"gcp":{}}"#).is_err());
        assert!(CloudProvider::parse(r#"{"aws":{"elbs":[{"type":"NLB","colour":"red"}]}}"#).is_err());
        assert!(CloudProvider::parse("not json").is_err());
    }
}
