//! Centralized string constants for strata
//!
//! `OpenAPI` 3.0 key names used by the builders, plus the user-facing hint
//! strings shared between error rendering paths.

// References and extensions
pub const REF_KEY: &str = "$ref";
pub const EXTENSION_PREFIX: &str = "x-";

// Document
pub const FIELD_OPENAPI: &str = "openapi";
pub const FIELD_INFO: &str = "info";
pub const FIELD_SERVERS: &str = "servers";
pub const FIELD_PATHS: &str = "paths";
pub const FIELD_COMPONENTS: &str = "components";
pub const FIELD_SECURITY: &str = "security";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_EXTERNAL_DOCS: &str = "externalDocs";

// Components
pub const COMPONENT_SCHEMAS: &str = "schemas";
pub const COMPONENT_RESPONSES: &str = "responses";
pub const COMPONENT_PARAMETERS: &str = "parameters";
pub const COMPONENT_EXAMPLES: &str = "examples";
pub const COMPONENT_REQUEST_BODIES: &str = "requestBodies";
pub const COMPONENT_HEADERS: &str = "headers";
pub const COMPONENT_SECURITY_SCHEMES: &str = "securitySchemes";
pub const COMPONENT_LINKS: &str = "links";
pub const COMPONENT_CALLBACKS: &str = "callbacks";

// Common fields
pub const FIELD_NAME: &str = "name";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_URL: &str = "url";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_TERMS_OF_SERVICE: &str = "termsOfService";
pub const FIELD_CONTACT: &str = "contact";
pub const FIELD_LICENSE: &str = "license";
pub const FIELD_VARIABLES: &str = "variables";
pub const FIELD_ENUM: &str = "enum";
pub const FIELD_DEFAULT: &str = "default";
pub const FIELD_EXAMPLE: &str = "example";
pub const FIELD_EXAMPLES: &str = "examples";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_EXTERNAL_VALUE: &str = "externalValue";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_HEADERS: &str = "headers";
pub const FIELD_SCHEMA: &str = "schema";
pub const FIELD_ENCODING: &str = "encoding";
pub const FIELD_CONTENT_TYPE: &str = "contentType";
pub const FIELD_LINKS: &str = "links";

// Parameters and headers
pub const FIELD_IN: &str = "in";
pub const FIELD_REQUIRED: &str = "required";
pub const FIELD_DEPRECATED: &str = "deprecated";
pub const FIELD_ALLOW_EMPTY_VALUE: &str = "allowEmptyValue";
pub const FIELD_STYLE: &str = "style";
pub const FIELD_EXPLODE: &str = "explode";
pub const FIELD_ALLOW_RESERVED: &str = "allowReserved";

// Paths and operations
pub const FIELD_PARAMETERS: &str = "parameters";
pub const FIELD_REQUEST_BODY: &str = "requestBody";
pub const FIELD_RESPONSES: &str = "responses";
pub const FIELD_CALLBACKS: &str = "callbacks";
pub const FIELD_OPERATION_ID: &str = "operationId";
pub const FIELD_OPERATION_REF: &str = "operationRef";
pub const FIELD_SERVER: &str = "server";

// HTTP methods, in path item declaration order
pub const HTTP_METHOD_GET: &str = "get";
pub const HTTP_METHOD_PUT: &str = "put";
pub const HTTP_METHOD_POST: &str = "post";
pub const HTTP_METHOD_DELETE: &str = "delete";
pub const HTTP_METHOD_OPTIONS: &str = "options";
pub const HTTP_METHOD_HEAD: &str = "head";
pub const HTTP_METHOD_PATCH: &str = "patch";
pub const HTTP_METHOD_TRACE: &str = "trace";

// Schema
pub const FIELD_TYPE: &str = "type";
pub const FIELD_FORMAT: &str = "format";
pub const FIELD_MULTIPLE_OF: &str = "multipleOf";
pub const FIELD_MAXIMUM: &str = "maximum";
pub const FIELD_EXCLUSIVE_MAXIMUM: &str = "exclusiveMaximum";
pub const FIELD_MINIMUM: &str = "minimum";
pub const FIELD_EXCLUSIVE_MINIMUM: &str = "exclusiveMinimum";
pub const FIELD_MAX_LENGTH: &str = "maxLength";
pub const FIELD_MIN_LENGTH: &str = "minLength";
pub const FIELD_PATTERN: &str = "pattern";
pub const FIELD_MAX_ITEMS: &str = "maxItems";
pub const FIELD_MIN_ITEMS: &str = "minItems";
pub const FIELD_UNIQUE_ITEMS: &str = "uniqueItems";
pub const FIELD_MAX_PROPERTIES: &str = "maxProperties";
pub const FIELD_MIN_PROPERTIES: &str = "minProperties";
pub const FIELD_ALL_OF: &str = "allOf";
pub const FIELD_ONE_OF: &str = "oneOf";
pub const FIELD_ANY_OF: &str = "anyOf";
pub const FIELD_NOT: &str = "not";
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_PROPERTIES: &str = "properties";
pub const FIELD_ADDITIONAL_PROPERTIES: &str = "additionalProperties";
pub const FIELD_NULLABLE: &str = "nullable";
pub const FIELD_DISCRIMINATOR: &str = "discriminator";
pub const FIELD_PROPERTY_NAME: &str = "propertyName";
pub const FIELD_MAPPING: &str = "mapping";
pub const FIELD_READ_ONLY: &str = "readOnly";
pub const FIELD_WRITE_ONLY: &str = "writeOnly";
pub const FIELD_XML: &str = "xml";
pub const FIELD_NAMESPACE: &str = "namespace";
pub const FIELD_PREFIX: &str = "prefix";
pub const FIELD_ATTRIBUTE: &str = "attribute";
pub const FIELD_WRAPPED: &str = "wrapped";

// Security
pub const FIELD_SCHEME: &str = "scheme";
pub const FIELD_BEARER_FORMAT: &str = "bearerFormat";
pub const FIELD_FLOWS: &str = "flows";
pub const FIELD_OPEN_ID_CONNECT_URL: &str = "openIdConnectUrl";
pub const FLOW_IMPLICIT: &str = "implicit";
pub const FLOW_PASSWORD: &str = "password";
pub const FLOW_CLIENT_CREDENTIALS: &str = "clientCredentials";
pub const FLOW_AUTHORIZATION_CODE: &str = "authorizationCode";
pub const FIELD_AUTHORIZATION_URL: &str = "authorizationUrl";
pub const FIELD_TOKEN_URL: &str = "tokenUrl";
pub const FIELD_REFRESH_URL: &str = "refreshUrl";
pub const FIELD_SCOPES: &str = "scopes";

// Environment Variables
pub const ENV_STRATA_LOG: &str = "STRATA_LOG";
pub const ENV_STRATA_LOG_FORMAT: &str = "STRATA_LOG_FORMAT";
pub const ENV_STRATA_LOG_FILE: &str = "STRATA_LOG_FILE";

// File System Messages
pub const ERR_FILE_NOT_FOUND: &str = "Check that the file path is correct and the file exists.";
pub const ERR_PERMISSION: &str = "Check file permissions or run with appropriate privileges.";

// Network Messages
pub const ERR_CONNECTION: &str = "Check that the remote document host is reachable.";

// Syntax Messages
pub const ERR_YAML_SYNTAX: &str = "Check that your OpenAPI specification is valid YAML or JSON.";
pub const ERR_TOML_SYNTAX: &str = "Check that your configuration file is valid TOML syntax.";

// Default Values
pub const DEFAULT_MAX_DEPTH: usize = 30;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

/// Upper bound on `$ref` -> `$ref` hops before a chain is declared a loop
pub const MAX_REFERENCE_HOPS: usize = 10;
