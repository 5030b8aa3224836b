use serde_json::json;
use std::path::Path;
use std::process::Output;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_hostal");

fn command(home: &Path, args: &[&str]) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(BIN);
    cmd.args(args)
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("HOSTAL_API_URL")
        .env_remove("HOSTAL_API_TOKEN")
        .env_remove("HOSTAL_LOG_LEVEL");
    cmd
}

async fn run_hostal(args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    command(home.path(), args)
        .output()
        .await
        .expect("Failed to execute hostal command")
}

async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    command(home.path(), args)
        .env("HOSTAL_API_URL", format!("{}/api", server.uri()))
        .output()
        .await
        .expect("Failed to execute hostal command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

mod basic_tests {
    use super::*;

    #[tokio::test]
    async fn test_help_lists_resources() {
        let output = run_hostal(&["--help"]).await;
        let out = stdout(&output);

        assert!(output.status.success());
        for command in ["rooms", "categories", "states", "reservations", "messages", "config"] {
            assert!(out.contains(command), "help should mention '{}'", command);
        }
    }

    #[tokio::test]
    async fn test_version() {
        let output = run_hostal(&["version"]).await;
        assert!(output.status.success());
        assert!(stdout(&output).contains("hostal 0.1.0"));

        let output = run_hostal(&["version", "--detailed"]).await;
        assert!(output.status.success());
        assert!(stdout(&output).contains("Apache-2.0"));
    }

    #[tokio::test]
    async fn test_unknown_command_fails() {
        let output = run_hostal(&["bookings"]).await;
        assert!(!output.status.success());
    }

    #[tokio::test]
    async fn test_invalid_api_url_is_rejected() {
        let home = tempfile::tempdir().unwrap();
        let output = command(home.path(), &["rooms", "list"])
            .env("HOSTAL_API_URL", "ftp://hotel.local/api")
            .output()
            .await
            .unwrap();

        assert!(!output.status.success());
        assert!(stderr(&output).contains("api.base_url"));
    }
}

mod config_tests {
    use super::*;

    #[tokio::test]
    async fn test_config_init_then_show() {
        let home = tempfile::tempdir().unwrap();

        let output = command(home.path(), &["config", "init"]).output().await.unwrap();
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(home
            .path()
            .join(".config")
            .join("hostal")
            .join("config.toml")
            .exists());

        let output = command(home.path(), &["config", "init"]).output().await.unwrap();
        assert!(!output.status.success(), "second init needs --force");

        let output = command(home.path(), &["config", "show", "--format", "json"])
            .output()
            .await
            .unwrap();
        assert!(output.status.success());
        let config: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(config["api"]["base_url"], "http://localhost:8080/api");
        assert_eq!(config["display"]["page_size"], 20);
    }

    #[tokio::test]
    async fn test_config_show_masks_token() {
        let home = tempfile::tempdir().unwrap();
        let output = command(home.path(), &["config", "show"])
            .env("HOSTAL_API_TOKEN", "very-secret")
            .output()
            .await
            .unwrap();

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("****"));
        assert!(!out.contains("very-secret"));
    }
}

mod rooms_tests {
    use super::*;

    async fn mount_rooms(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/habitacions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Total-Count", "2")
                    .set_body_json(json!([
                        {
                            "id": 1,
                            "numero": "101",
                            "capacidad": 2,
                            "activo": true,
                            "categoriaHabitacion": {"id": 1, "nombre": "DOBLE", "precioBase": 80.0},
                            "estadoHabitacion": {"id": 1, "nombre": "DISPONIBLE"}
                        },
                        {
                            "id": 2,
                            "numero": "305",
                            "capacidad": 4,
                            "activo": false,
                            "categoriaHabitacion": {"id": 3, "nombre": "SUITE", "precioBase": 200.0},
                            "estadoHabitacion": {"id": 3, "nombre": "MANTENIMIENTO"}
                        }
                    ])),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_rooms_list_table() {
        let server = MockServer::start().await;
        mount_rooms(&server).await;

        let output = run_against(&server, &["rooms", "list"]).await;
        let out = stdout(&output);

        assert!(output.status.success(), "{}", stderr(&output));
        assert!(out.contains("101"));
        assert!(out.contains("305"));
        assert!(out.contains("SUITE"));
        assert!(out.contains("Showing 2 of 2 rooms"));
    }

    #[tokio::test]
    async fn test_rooms_list_filters_json() {
        let server = MockServer::start().await;
        mount_rooms(&server).await;

        let output = run_against(
            &server,
            &["rooms", "list", "--category", "suite", "--format", "json"],
        )
        .await;

        assert!(output.status.success(), "{}", stderr(&output));
        let rooms: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        let rooms = rooms.as_array().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0]["numero"], "305");
    }

    #[tokio::test]
    async fn test_verbose_logs_client_setup() {
        let server = MockServer::start().await;
        mount_rooms(&server).await;

        let output = run_against(&server, &["--verbose", "rooms", "list"]).await;

        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stderr(&output).contains("API client ready"));

        let quiet = run_against(&server, &["rooms", "list"]).await;
        assert!(!stderr(&quiet).contains("API client ready"));
    }

    #[tokio::test]
    async fn test_rooms_options_lists_active_choices() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/categoria-habitacions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "nombre": "DOBLE", "precioBase": 80.0, "activo": true},
                {"id": 2, "nombre": "FAMILIAR", "precioBase": 150.0, "activo": false}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/estado-habitacions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "nombre": "DISPONIBLE", "activo": true},
                {"id": 3, "nombre": "MANTENIMIENTO", "activo": true}
            ])))
            .mount(&server)
            .await;

        let output = run_against(&server, &["rooms", "options"]).await;
        let out = stdout(&output);

        assert!(output.status.success(), "{}", stderr(&output));
        assert!(out.contains("DOBLE"));
        assert!(!out.contains("FAMILIAR"));
        assert!(out.contains("DISPONIBLE"));
        assert!(out.contains("MANTENIMIENTO"));
    }

    #[tokio::test]
    async fn test_rooms_create_validation_fails_before_request() {
        let server = MockServer::start().await;

        let output = run_against(
            &server,
            &[
                "rooms", "create", "--number", "12", "--capacity", "0", "--category", "1",
                "--state", "1",
            ],
        )
        .await;

        assert!(!output.status.success());
        assert!(stderr(&output).contains("capacity"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rooms_delete_requires_yes() {
        let server = MockServer::start().await;

        let output = run_against(&server, &["rooms", "delete", "4"]).await;
        assert!(!output.status.success());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

mod reservations_tests {
    use super::*;

    #[tokio::test]
    async fn test_confirm_pending_reservation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/reservas/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8,
                "estado": "PENDING",
                "activo": true
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/reservas/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8,
                "estado": "CONFIRMED",
                "activo": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let output = run_against(&server, &["reservations", "confirm", "8"]).await;

        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("CONFIRMED"));
    }

    #[tokio::test]
    async fn test_cancel_finalized_reservation_is_refused() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/reservas/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9,
                "estado": "FINALIZED"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/reservas/9"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let output = run_against(&server, &["reservations", "cancel", "9"]).await;

        assert!(!output.status.success());
        assert!(stderr(&output).contains("E3002"));
    }

    #[tokio::test]
    async fn test_show_overview() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/reservas/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "cliente": {"id": 5},
                "fechaInicio": "2025-08-01",
                "fechaFin": "2025-08-03",
                "estado": "CONFIRMED",
                "activo": true
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/clientes/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "nombre": "Marta",
                "apellido": "Gil"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/reserva-detalles"))
            .and(query_param("reservaId.equals", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 30, "reserva": {"id": 3}, "habitacion": {"id": 1}, "precioUnitario": 80.0}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/habitacions/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "numero": "101",
                "categoriaHabitacion": {"id": 1, "nombre": "DOBLE", "precioBase": 80.0}
            })))
            .mount(&server)
            .await;

        let output = run_against(&server, &["reservations", "show", "3", "--format", "json"]).await;
        assert!(output.status.success(), "{}", stderr(&output));

        let overview: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(overview["client"]["nombre"], "Marta");
        assert_eq!(overview["nights"], 2);
        assert_eq!(overview["total"], 160.0);
        assert_eq!(overview["actions"], json!(["check-in", "cancel"]));
    }
}

mod messages_tests {
    use super::*;

    #[tokio::test]
    async fn test_unread_summary() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/mensaje-soportes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "mensaje": "Hi", "remitente": "CLIENT", "leido": false, "userId": "u-1", "fechaEnvio": "2025-05-01T10:00:00Z"},
                {"id": 2, "mensaje": "Hello", "remitente": "ADMIN", "leido": false, "userId": "u-1", "fechaEnvio": "2025-05-01T10:05:00Z"},
                {"id": 3, "mensaje": "Late checkout?", "remitente": "CLIENT", "leido": false, "userId": "u-2", "fechaEnvio": "2025-05-02T08:00:00Z"},
                {"id": 4, "mensaje": "Thanks", "remitente": "CLIENT", "leido": true, "userId": "u-2", "fechaEnvio": "2025-05-02T09:00:00Z"}
            ])))
            .mount(&server)
            .await;

        let output = run_against(&server, &["messages", "unread", "--format", "json"]).await;
        assert!(output.status.success(), "{}", stderr(&output));

        let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(summary["total"], 2);
        assert_eq!(summary["users"].as_array().unwrap().len(), 2);
    }
}
