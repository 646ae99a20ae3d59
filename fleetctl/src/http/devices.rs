//! Device management API client

use async_trait::async_trait;
use fleet_api::models::{
    GetDeviceActionStatusRequest, GetDeviceActionStatusResponse, GetDeviceInfoRequest,
    GetDeviceInfoResponse, InitiateDeviceActionRequest, InitiateDeviceActionResponse,
    ListDevicesRequest, ListDevicesResponse, RegisterDeviceRequest, RegisterDeviceResponse,
    SetDeviceStatusRequest, SetDeviceStatusResponse,
};

use crate::errors::TransportError;
use crate::http::client::HttpClient;
use crate::http::service::DeviceService;

#[async_trait]
impl DeviceService for HttpClient {
    async fn register_device(
        &self,
        request: RegisterDeviceRequest,
    ) -> Result<RegisterDeviceResponse, TransportError> {
        self.call("RegisterDevice", &request).await
    }

    async fn set_device_status(
        &self,
        request: SetDeviceStatusRequest,
    ) -> Result<SetDeviceStatusResponse, TransportError> {
        self.call("SetDeviceStatus", &request).await
    }

    async fn get_device_info(
        &self,
        request: GetDeviceInfoRequest,
    ) -> Result<GetDeviceInfoResponse, TransportError> {
        self.call("GetDeviceInfo", &request).await
    }

    async fn list_devices(
        &self,
        request: ListDevicesRequest,
    ) -> Result<ListDevicesResponse, TransportError> {
        self.call("ListDevices", &request).await
    }

    async fn initiate_device_action(
        &self,
        request: InitiateDeviceActionRequest,
    ) -> Result<InitiateDeviceActionResponse, TransportError> {
        self.call("InitiateDeviceAction", &request).await
    }

    async fn get_device_action_status(
        &self,
        request: GetDeviceActionStatusRequest,
    ) -> Result<GetDeviceActionStatusResponse, TransportError> {
        self.call("GetDeviceActionStatus", &request).await
    }
}
