use aws_sdk_quicksight::types::{
    DataSource,
    DataSourceParameters,
    IdentityCenterConfiguration,
    ManifestFileLocation,
    OAuthParameters,
    RedshiftIamParameters,
    SslProperties,
    VpcConnectionProperties,
};
use lineage_model::schema::{FIELD_DATA_SOURCE_PARAMETERS, FIELD_NAME, ID_DATA_SOURCE};
use serde_json::Value;

use super::{Fields, Wire, tagged, unlisted_member};

pub(crate) fn data_source(source: &DataSource) -> Value {
    Fields::new()
        .put(ID_DATA_SOURCE, source.data_source_id())
        .put(FIELD_NAME, source.name())
        .put("Arn", source.arn())
        .put("Type", source.r#type())
        .put("Status", source.status())
        .put_nested(
            FIELD_DATA_SOURCE_PARAMETERS,
            source.data_source_parameters(),
            data_source_parameters,
        )
        .put_list(
            "AlternateDataSourceParameters",
            source.alternate_data_source_parameters(),
            data_source_parameters,
        )
        .put_nested(
            "VpcConnectionProperties",
            source.vpc_connection_properties(),
            vpc_connection,
        )
        .put_nested("SslProperties", source.ssl_properties(), ssl_properties)
        .put("SecretArn", source.secret_arn())
        .build()
}

/// Host, port and database triple shared by most relational engines.
macro_rules! endpoint {
    ($parameters:expr) => {
        Fields::new()
            .put("Host", $parameters.host())
            .put("Port", $parameters.port())
            .put("Database", $parameters.database())
    };
}

/// Host, port and catalog triple of the federated query engines.
macro_rules! catalog_endpoint {
    ($parameters:expr) => {
        Fields::new()
            .put("Host", $parameters.host())
            .put("Port", $parameters.port())
            .put("Catalog", $parameters.catalog())
    };
}

fn data_source_parameters(parameters: &DataSourceParameters) -> Value {
    match parameters {
        DataSourceParameters::AmazonElasticsearchParameters(elasticsearch) => tagged(
            "AmazonElasticsearchParameters",
            Fields::new().put("Domain", elasticsearch.domain()).build(),
        ),
        DataSourceParameters::AmazonOpenSearchParameters(opensearch) => tagged(
            "AmazonOpenSearchParameters",
            Fields::new().put("Domain", opensearch.domain()).build(),
        ),
        DataSourceParameters::AthenaParameters(athena) => tagged(
            "AthenaParameters",
            Fields::new()
                .put("WorkGroup", athena.work_group())
                .put("RoleArn", athena.role_arn())
                .put_nested(
                    "IdentityCenterConfiguration",
                    athena.identity_center_configuration(),
                    identity_center,
                )
                .build(),
        ),
        DataSourceParameters::AuroraParameters(aurora) => {
            tagged("AuroraParameters", endpoint!(aurora).build())
        }
        DataSourceParameters::AuroraPostgreSqlParameters(aurora) => {
            tagged("AuroraPostgreSqlParameters", endpoint!(aurora).build())
        }
        DataSourceParameters::AwsIotAnalyticsParameters(iot) => tagged(
            "AwsIotAnalyticsParameters",
            Fields::new().put("DataSetName", iot.data_set_name()).build(),
        ),
        DataSourceParameters::BigQueryParameters(big_query) => tagged(
            "BigQueryParameters",
            Fields::new()
                .put("ProjectId", big_query.project_id())
                .put("DataSetRegion", big_query.data_set_region())
                .build(),
        ),
        DataSourceParameters::ConfluenceParameters(confluence) => tagged(
            "ConfluenceParameters",
            Fields::new()
                .put("ConfluenceUrl", confluence.confluence_url())
                .build(),
        ),
        DataSourceParameters::CustomConnectionParameters(custom) => tagged(
            "CustomConnectionParameters",
            Fields::new()
                .put("ConnectionType", custom.connection_type())
                .build(),
        ),
        DataSourceParameters::DatabricksParameters(databricks) => tagged(
            "DatabricksParameters",
            Fields::new()
                .put("Host", databricks.host())
                .put("Port", databricks.port())
                .put("SqlEndpointPath", databricks.sql_endpoint_path())
                .build(),
        ),
        DataSourceParameters::ExasolParameters(exasol) => tagged(
            "ExasolParameters",
            Fields::new()
                .put("Host", exasol.host())
                .put("Port", exasol.port())
                .build(),
        ),
        DataSourceParameters::ImpalaParameters(impala) => tagged(
            "ImpalaParameters",
            Fields::new()
                .put("Host", impala.host())
                .put("Port", impala.port())
                .put("Database", impala.database())
                .put("SqlEndpointPath", impala.sql_endpoint_path())
                .build(),
        ),
        DataSourceParameters::JiraParameters(jira) => tagged(
            "JiraParameters",
            Fields::new().put("SiteBaseUrl", jira.site_base_url()).build(),
        ),
        DataSourceParameters::MariaDbParameters(maria) => {
            tagged("MariaDbParameters", endpoint!(maria).build())
        }
        DataSourceParameters::MySqlParameters(mysql) => {
            tagged("MySqlParameters", endpoint!(mysql).build())
        }
        DataSourceParameters::OracleParameters(oracle) => tagged(
            "OracleParameters",
            endpoint!(oracle)
                .put("UseServiceName", oracle.use_service_name())
                .build(),
        ),
        DataSourceParameters::PostgreSqlParameters(postgres) => {
            tagged("PostgreSqlParameters", endpoint!(postgres).build())
        }
        DataSourceParameters::PrestoParameters(presto) => {
            tagged("PrestoParameters", catalog_endpoint!(presto).build())
        }
        DataSourceParameters::QBusinessParameters(q_business) => tagged(
            "QBusinessParameters",
            Fields::new()
                .put("ApplicationArn", q_business.application_arn())
                .build(),
        ),
        DataSourceParameters::RdsParameters(rds) => tagged(
            "RdsParameters",
            Fields::new()
                .put("InstanceId", rds.instance_id())
                .put("Database", rds.database())
                .build(),
        ),
        DataSourceParameters::RedshiftParameters(redshift) => tagged(
            "RedshiftParameters",
            Fields::new()
                .put("Host", redshift.host())
                .put("Port", redshift.port())
                .put("Database", redshift.database())
                .put("ClusterId", redshift.cluster_id())
                .put_nested("IAMParameters", redshift.iam_parameters(), redshift_iam)
                .put_nested(
                    "IdentityCenterConfiguration",
                    redshift.identity_center_configuration(),
                    identity_center,
                )
                .build(),
        ),
        DataSourceParameters::S3KnowledgeBaseParameters(knowledge_base) => tagged(
            "S3KnowledgeBaseParameters",
            Fields::new()
                .put("RoleArn", knowledge_base.role_arn())
                .put("BucketUrl", knowledge_base.bucket_url())
                .put(
                    "MetadataFilesLocation",
                    knowledge_base.metadata_files_location(),
                )
                .build(),
        ),
        DataSourceParameters::S3Parameters(s3) => tagged(
            "S3Parameters",
            Fields::new()
                .put_nested(
                    "ManifestFileLocation",
                    s3.manifest_file_location(),
                    manifest_file_location,
                )
                .put("RoleArn", s3.role_arn())
                .build(),
        ),
        DataSourceParameters::ServiceNowParameters(service_now) => tagged(
            "ServiceNowParameters",
            Fields::new()
                .put("SiteBaseUrl", service_now.site_base_url())
                .build(),
        ),
        DataSourceParameters::SnowflakeParameters(snowflake) => tagged(
            "SnowflakeParameters",
            Fields::new()
                .put("Host", snowflake.host())
                .put("Database", snowflake.database())
                .put("Warehouse", snowflake.warehouse())
                .put("AuthenticationType", snowflake.authentication_type())
                .put(
                    "DatabaseAccessControlRole",
                    snowflake.database_access_control_role(),
                )
                .put_nested("OAuthParameters", snowflake.o_auth_parameters(), o_auth)
                .build(),
        ),
        DataSourceParameters::SparkParameters(spark) => tagged(
            "SparkParameters",
            Fields::new()
                .put("Host", spark.host())
                .put("Port", spark.port())
                .build(),
        ),
        DataSourceParameters::SqlServerParameters(sql_server) => {
            tagged("SqlServerParameters", endpoint!(sql_server).build())
        }
        DataSourceParameters::StarburstParameters(starburst) => tagged(
            "StarburstParameters",
            catalog_endpoint!(starburst)
                .put("ProductType", starburst.product_type())
                .put(
                    "DatabaseAccessControlRole",
                    starburst.database_access_control_role(),
                )
                .put("AuthenticationType", starburst.authentication_type())
                .put_nested("OAuthParameters", starburst.o_auth_parameters(), o_auth)
                .build(),
        ),
        DataSourceParameters::TeradataParameters(teradata) => {
            tagged("TeradataParameters", endpoint!(teradata).build())
        }
        DataSourceParameters::TrinoParameters(trino) => {
            tagged("TrinoParameters", catalog_endpoint!(trino).build())
        }
        DataSourceParameters::TwitterParameters(twitter) => tagged(
            "TwitterParameters",
            Fields::new()
                .put("Query", twitter.query())
                .put("MaxRows", twitter.max_rows())
                .build(),
        ),
        DataSourceParameters::WebCrawlerParameters(crawler) => tagged(
            "WebCrawlerParameters",
            Fields::new()
                .put("WebCrawlerAuthType", crawler.web_crawler_auth_type())
                .put("UsernameFieldXpath", crawler.username_field_xpath())
                .put("PasswordFieldXpath", crawler.password_field_xpath())
                .put("UsernameButtonXpath", crawler.username_button_xpath())
                .put("PasswordButtonXpath", crawler.password_button_xpath())
                .put("LoginPageUrl", crawler.login_page_url())
                .put("WebProxyHostName", crawler.web_proxy_host_name())
                .put("WebProxyPortNumber", crawler.web_proxy_port_number())
                .build(),
        ),
        other => unlisted_member(other),
    }
}

fn manifest_file_location(location: &ManifestFileLocation) -> Value {
    Fields::new()
        .put("Bucket", location.bucket())
        .put("Key", location.key())
        .build()
}

fn redshift_iam(iam: &RedshiftIamParameters) -> Value {
    Fields::new()
        .put("RoleArn", iam.role_arn())
        .put("DatabaseUser", iam.database_user())
        .put_list("DatabaseGroups", iam.database_groups(), |group| group.wire())
        .put("AutoCreateDatabaseUser", iam.auto_create_database_user())
        .build()
}

fn identity_center(configuration: &IdentityCenterConfiguration) -> Value {
    Fields::new()
        .put(
            "EnableIdentityPropagation",
            configuration.enable_identity_propagation(),
        )
        .build()
}

fn o_auth(parameters: &OAuthParameters) -> Value {
    Fields::new()
        .put("TokenProviderUrl", parameters.token_provider_url())
        .put("OAuthScope", parameters.o_auth_scope())
        .put_nested(
            "IdentityProviderVpcConnectionProperties",
            parameters.identity_provider_vpc_connection_properties(),
            vpc_connection,
        )
        .put(
            "IdentityProviderResourceUri",
            parameters.identity_provider_resource_uri(),
        )
        .build()
}

fn vpc_connection(properties: &VpcConnectionProperties) -> Value {
    Fields::new()
        .put("VpcConnectionArn", properties.vpc_connection_arn())
        .build()
}

fn ssl_properties(properties: &SslProperties) -> Value {
    Fields::new().put("DisableSsl", properties.disable_ssl()).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_quicksight::types::{
        DataSourceType,
        OracleParameters,
        RedshiftParameters,
        S3Parameters,
        TrinoParameters,
    };
    use serde_json::json;

    #[test]
    fn oracle_parameters_keep_wire_name_and_fields() {
        let oracle = OracleParameters::builder()
            .host("db.local")
            .port(1521)
            .database("ORCL")
            .build()
            .expect("oracle parameters");

        assert_eq!(
            data_source_parameters(&DataSourceParameters::OracleParameters(oracle)),
            json!({
                "OracleParameters": {
                    "Host": "db.local",
                    "Port": 1521,
                    "Database": "ORCL",
                    "UseServiceName": false
                }
            })
        );
    }

    #[test]
    fn redshift_parameters_keep_iam_settings() {
        let redshift = RedshiftParameters::builder()
            .host("cluster.example.us-east-1.redshift.amazonaws.com")
            .port(5439)
            .database("analytics")
            .cluster_id("cluster-1")
            .iam_parameters(
                RedshiftIamParameters::builder()
                    .role_arn("arn:aws:iam::111122223333:role/redshift-reader")
                    .database_user("reader")
                    .database_groups("analysts")
                    .build()
                    .expect("iam parameters"),
            )
            .build()
            .expect("redshift parameters");

        assert_eq!(
            data_source_parameters(&DataSourceParameters::RedshiftParameters(redshift)),
            json!({
                "RedshiftParameters": {
                    "Host": "cluster.example.us-east-1.redshift.amazonaws.com",
                    "Port": 5439,
                    "Database": "analytics",
                    "ClusterId": "cluster-1",
                    "IAMParameters": {
                        "RoleArn": "arn:aws:iam::111122223333:role/redshift-reader",
                        "DatabaseUser": "reader",
                        "DatabaseGroups": ["analysts"],
                        "AutoCreateDatabaseUser": false
                    }
                }
            })
        );
    }

    #[test]
    fn trino_parameters_use_catalog_endpoint() {
        let trino = TrinoParameters::builder()
            .host("trino.local")
            .port(8443)
            .catalog("hive")
            .build()
            .expect("trino parameters");

        assert_eq!(
            data_source_parameters(&DataSourceParameters::TrinoParameters(trino)),
            json!({"TrinoParameters": {"Host": "trino.local", "Port": 8443, "Catalog": "hive"}})
        );
    }

    #[test]
    fn data_source_omits_absent_sections() {
        let manifest = ManifestFileLocation::builder()
            .bucket("lake")
            .key("manifests/orders.json")
            .build()
            .expect("manifest location");
        let source = DataSource::builder()
            .data_source_id("src-s3")
            .name("Lake")
            .r#type(DataSourceType::S3)
            .data_source_parameters(DataSourceParameters::S3Parameters(
                S3Parameters::builder().manifest_file_location(manifest).build(),
            ))
            .build();

        assert_eq!(
            data_source(&source),
            json!({
                "DataSourceId": "src-s3",
                "Name": "Lake",
                "Type": "S3",
                "DataSourceParameters": {
                    "S3Parameters": {
                        "ManifestFileLocation": {
                            "Bucket": "lake",
                            "Key": "manifests/orders.json"
                        }
                    }
                }
            })
        );
    }
}
