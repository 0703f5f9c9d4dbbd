use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::services::EmployeeService;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedResponse {
    message: &'static str,
    id: i64,
    new_employee: Employee,
}

#[derive(Serialize)]
struct DataResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    data: T,
}

pub async fn get_employees(
    service: web::Data<EmployeeService>,
) -> Result<HttpResponse, AppError> {
    let employees = service.list().await?;
    Ok(HttpResponse::Ok().json(DataResponse {
        message: None,
        data: employees,
    }))
}

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let employee = service.create(&body).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Employee created successfully",
        id: employee.id,
        new_employee: employee,
    }))
}

pub async fn update_employee(
    service: web::Data<EmployeeService>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let employee = service.update(&body).await?;
    Ok(HttpResponse::Ok().json(DataResponse {
        message: Some("Employee details updated successfully"),
        data: employee,
    }))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    // A non-numeric id cannot name an existing employee.
    let id = id
        .parse::<i64>()
        .map_err(|_| AppError::NotFound("Employee does not exist".to_string()))?;

    service.delete(id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully",
    })))
}
